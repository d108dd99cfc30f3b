use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use chronoutil::shift_months;
use serde::{Deserialize, Serialize};

use milo_domain::{Payment, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: NaiveDate,
    pub revenue: f64,
}

/// Paid revenue per day over an inclusive date range. Days without
/// payments are present with zero revenue so the series is dense.
pub fn revenue_by_day(
    payments: &[Payment],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<RevenuePoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for payment in payments {
        if payment.status != PaymentStatus::Paid {
            continue;
        }
        if payment.payment_date < from || payment.payment_date > to {
            continue;
        }
        *by_date.entry(payment.payment_date).or_insert(0.0) += payment.amount;
    }

    let mut series = Vec::new();
    let mut date = from;
    while date <= to {
        series.push(RevenuePoint {
            date,
            revenue: by_date.get(&date).copied().unwrap_or(0.0),
        });
        date += Duration::days(1);
    }
    series
}

/// Paid revenue grouped by calendar month, from the first to the last
/// month with a payment. Empty input yields an empty series.
pub fn revenue_by_month(payments: &[Payment]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for payment in payments {
        if payment.status != PaymentStatus::Paid {
            continue;
        }
        let month = month_start(payment.payment_date);
        *by_month.entry(month).or_insert(0.0) += payment.amount;
    }

    let (first, last) = match (
        by_month.keys().next().copied(),
        by_month.keys().next_back().copied(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(MonthlyRevenue {
            month,
            revenue: by_month.get(&month).copied().unwrap_or(0.0),
        });
        month = shift_months(month, 1);
    }
    series
}

fn month_start(date: NaiveDate) -> NaiveDate {
    // Day one always exists.
    date.with_day(1).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paid(amount: f64, on: NaiveDate) -> Payment {
        Payment {
            amount,
            status: PaymentStatus::Paid,
            payment_date: on,
            ..Default::default()
        }
    }

    #[test]
    fn test_revenue_by_day_is_dense() {
        let payments = vec![
            paid(500.0, date(2025, 6, 1)),
            paid(250.0, date(2025, 6, 1)),
            paid(100.0, date(2025, 6, 3)),
        ];
        let series =
            revenue_by_day(&payments, date(2025, 6, 1), date(2025, 6, 4));
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].revenue, 750.0);
        assert_eq!(series[1].revenue, 0.0);
        assert_eq!(series[2].revenue, 100.0);
        assert_eq!(series[3].revenue, 0.0);
    }

    #[test]
    fn test_revenue_by_day_skips_unpaid_and_out_of_range() {
        let payments = vec![
            Payment {
                amount: 900.0,
                status: PaymentStatus::Pending,
                payment_date: date(2025, 6, 1),
                ..Default::default()
            },
            paid(100.0, date(2025, 5, 31)),
        ];
        let series =
            revenue_by_day(&payments, date(2025, 6, 1), date(2025, 6, 2));
        assert!(series.iter().all(|p| p.revenue == 0.0));
    }

    #[test]
    fn test_revenue_by_day_empty() {
        let series = revenue_by_day(&[], date(2025, 6, 1), date(2025, 6, 7));
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.revenue == 0.0));
    }

    #[test]
    fn test_revenue_by_month() {
        let payments = vec![
            paid(500.0, date(2025, 4, 10)),
            paid(500.0, date(2025, 4, 20)),
            // May has no paid payments
            paid(750.0, date(2025, 6, 1)),
        ];
        let series = revenue_by_month(&payments);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].month, date(2025, 4, 1));
        assert_eq!(series[0].revenue, 1000.0);
        assert_eq!(series[1].month, date(2025, 5, 1));
        assert_eq!(series[1].revenue, 0.0);
        assert_eq!(series[2].month, date(2025, 6, 1));
        assert_eq!(series[2].revenue, 750.0);
    }

    #[test]
    fn test_revenue_by_month_empty() {
        assert!(revenue_by_month(&[]).is_empty());
    }

    #[test]
    fn test_revenue_is_idempotent() {
        let payments = vec![paid(500.0, date(2025, 6, 1))];
        let first =
            revenue_by_day(&payments, date(2025, 6, 1), date(2025, 6, 30));
        let second =
            revenue_by_day(&payments, date(2025, 6, 1), date(2025, 6, 30));
        assert_eq!(first, second);
    }
}
