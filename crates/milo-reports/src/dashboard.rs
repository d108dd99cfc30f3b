use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use milo_domain::{CheckIn, Member, MemberStatus, Payment, PaymentStatus};

/// Days before expiry at which a membership counts as expiring soon.
pub const EXPIRY_WARNING_DAYS: u32 = 7;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub expired_members: usize,
    pub today_revenue: f64,
    pub today_payments: usize,
    pub today_check_ins: usize,
    pub expiring_this_week: usize,
}

/// Compute the dashboard stats for a given day from a full snapshot.
pub fn dashboard_stats(
    members: &[Member],
    payments: &[Payment],
    check_ins: &[CheckIn],
    today: NaiveDate,
) -> DashboardStats {
    let paid_today: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid && p.payment_date == today)
        .collect();

    DashboardStats {
        total_members: members.len(),
        active_members: members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .count(),
        expired_members: members
            .iter()
            .filter(|m| m.status == MemberStatus::Expired)
            .count(),
        today_revenue: paid_today.iter().map(|p| p.amount).sum(),
        today_payments: paid_today.len(),
        today_check_ins: check_ins
            .iter()
            .filter(|c| c.check_in_time.date() == today)
            .count(),
        expiring_this_week: expiring_within(members, today, EXPIRY_WARNING_DAYS)
            .len(),
    }
}

/// Active members whose expiry falls between today and the end of the
/// warning window, both inclusive.
pub fn expiring_within(
    members: &[Member],
    today: NaiveDate,
    days: u32,
) -> Vec<Member> {
    let until = today + Duration::days(days as i64);
    members
        .iter()
        .filter(|m| {
            m.status == MemberStatus::Active
                && m.membership_expiry >= today
                && m.membership_expiry <= until
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(status: MemberStatus, expiry: NaiveDate) -> Member {
        Member {
            status,
            membership_expiry: expiry,
            ..Default::default()
        }
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
    fn test_empty_snapshot_is_all_zeroes() {
        let stats = dashboard_stats(&[], &[], &[], date(2025, 6, 15));
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_dashboard_stats() {
        let today = date(2025, 6, 15);
        let members = vec![
            member(MemberStatus::Active, date(2025, 6, 18)),
            member(MemberStatus::Active, date(2025, 8, 1)),
            member(MemberStatus::Expired, date(2025, 5, 1)),
            member(MemberStatus::Frozen, date(2025, 7, 1)),
        ];
        let payments = vec![
            paid(500.0, today),
            paid(250.0, today),
            // Not counted: other day, not paid
            paid(100.0, date(2025, 6, 14)),
            Payment {
                amount: 900.0,
                status: PaymentStatus::Pending,
                payment_date: today,
                ..Default::default()
            },
        ];
        let check_ins = vec![
            CheckIn {
                check_in_time: today.and_hms_opt(7, 30, 0).unwrap(),
                ..Default::default()
            },
            CheckIn {
                check_in_time: date(2025, 6, 14).and_hms_opt(19, 0, 0).unwrap(),
                ..Default::default()
            },
        ];

        let stats = dashboard_stats(&members, &payments, &check_ins, today);
        assert_eq!(stats.total_members, 4);
        assert_eq!(stats.active_members, 2);
        assert_eq!(stats.expired_members, 1);
        assert_eq!(stats.today_revenue, 750.0);
        assert_eq!(stats.today_payments, 2);
        assert_eq!(stats.today_check_ins, 1);
        assert_eq!(stats.expiring_this_week, 1);
    }

    #[test]
    fn test_dashboard_stats_is_idempotent() {
        let today = date(2025, 6, 15);
        let members = vec![member(MemberStatus::Active, date(2025, 6, 20))];
        let payments = vec![paid(500.0, today)];
        let check_ins = vec![];

        let first = dashboard_stats(&members, &payments, &check_ins, today);
        let second = dashboard_stats(&members, &payments, &check_ins, today);
        assert_eq!(first, second);
    }

    #[test]
    fn test_expiring_window_bounds() {
        let today = date(2025, 6, 15);
        let members = vec![
            // On the window edges
            member(MemberStatus::Active, today),
            member(MemberStatus::Active, date(2025, 6, 22)),
            // Outside
            member(MemberStatus::Active, date(2025, 6, 23)),
            member(MemberStatus::Active, date(2025, 6, 14)),
            // Right expiry, wrong status
            member(MemberStatus::Inactive, date(2025, 6, 18)),
        ];
        let expiring = expiring_within(&members, today, 7);
        assert_eq!(expiring.len(), 2);
    }
}
