use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use milo_domain::CheckIn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePoint {
    pub date: NaiveDate,
    pub check_ins: usize,
}

/// Check-ins per day over an inclusive date range, zero-filled.
pub fn attendance_by_day(
    check_ins: &[CheckIn],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<AttendancePoint> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for check_in in check_ins {
        let day = check_in.check_in_time.date();
        if day < from || day > to {
            continue;
        }
        *by_date.entry(day).or_insert(0) += 1;
    }

    let mut series = Vec::new();
    let mut date = from;
    while date <= to {
        series.push(AttendancePoint {
            date,
            check_ins: by_date.get(&date).copied().unwrap_or(0),
        });
        date += Duration::days(1);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn visit(on: NaiveDate, hour: u32) -> CheckIn {
        CheckIn {
            check_in_time: on.and_hms_opt(hour, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_attendance_by_day() {
        let check_ins = vec![
            visit(date(2025, 6, 2), 7),
            visit(date(2025, 6, 2), 18),
            visit(date(2025, 6, 4), 9),
            // Out of range
            visit(date(2025, 5, 30), 9),
        ];
        let series =
            attendance_by_day(&check_ins, date(2025, 6, 1), date(2025, 6, 4));
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].check_ins, 0);
        assert_eq!(series[1].check_ins, 2);
        assert_eq!(series[2].check_ins, 0);
        assert_eq!(series[3].check_ins, 1);
    }

    #[test]
    fn test_attendance_empty() {
        let series = attendance_by_day(&[], date(2025, 6, 1), date(2025, 6, 3));
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|p| p.check_ins == 0));
    }

    #[test]
    fn test_attendance_is_idempotent() {
        let check_ins = vec![visit(date(2025, 6, 2), 7)];
        let first =
            attendance_by_day(&check_ins, date(2025, 6, 1), date(2025, 6, 7));
        let second =
            attendance_by_day(&check_ins, date(2025, 6, 1), date(2025, 6, 7));
        assert_eq!(first, second);
    }
}
