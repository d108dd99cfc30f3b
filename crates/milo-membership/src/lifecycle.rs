use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use milo_domain::{Member, MemberStatus, MembershipPlan, Update};

/// Expiry for a membership starting at the given date.
/// Plain calendar-day addition, this is the only formula used.
pub fn expiry_date(start: NaiveDate, duration_days: u32) -> NaiveDate {
    start + Duration::days(duration_days as i64)
}

pub trait StartMembership {
    /// Put a member on a plan starting at the given date.
    fn start_membership(self, plan: &MembershipPlan, start: NaiveDate) -> Member;
}

impl StartMembership for Member {
    /// Sets plan reference, start date, computed expiry and forces the
    /// status to active. Backdated starts are accepted as-is, even when
    /// the resulting expiry already lies in the past.
    fn start_membership(self, plan: &MembershipPlan, start: NaiveDate) -> Member {
        Member {
            plan_id: Some(plan.id),
            membership_start: start,
            membership_expiry: expiry_date(start, plan.duration_days),
            status: MemberStatus::Active,
            ..self
        }
    }
}

#[async_trait]
pub trait RenewMembership: Sized {
    /// Renew a membership and persist the member.
    async fn renew<DB>(
        self,
        db: &DB,
        plan: &MembershipPlan,
        start: NaiveDate,
    ) -> Result<Member>
    where
        DB: Update<Member> + Send + Sync;
}

#[async_trait]
impl RenewMembership for Member {
    /// The payment date becomes the new membership start; plan
    /// reference, expiry and status are overwritten.
    async fn renew<DB>(
        self,
        db: &DB,
        plan: &MembershipPlan,
        start: NaiveDate,
    ) -> Result<Member>
    where
        DB: Update<Member> + Send + Sync,
    {
        let member = self.start_membership(plan, start);
        let member = db.update(member).await?;
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(duration_days: u32) -> MembershipPlan {
        MembershipPlan {
            id: 1,
            name: "Monthly".to_string(),
            duration_days,
            price: 500.0,
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_expiry_date_is_calendar_addition() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            expiry_date(start, 30),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );

        // Across a month boundary
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            expiry_date(start, 30),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );

        // Across a year boundary
        let start = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(
            expiry_date(start, 365),
            NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()
        );
    }

    #[test]
    fn test_start_membership() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let member = Member {
            full_name: "Test Member".to_string(),
            status: MemberStatus::Expired,
            ..Default::default()
        };

        let member = member.start_membership(&plan(30), start);
        assert_eq!(member.plan_id, Some(1));
        assert_eq!(member.membership_start, start);
        assert_eq!(
            member.membership_expiry,
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
        assert_eq!(member.status, MemberStatus::Active);
    }

    #[test]
    fn test_start_membership_accepts_backdating() {
        // No guard: a start far enough in the past produces an
        // expiry in the past while the status still becomes active.
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let member = Member::default().start_membership(&plan(30), start);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(
            member.membership_expiry,
            NaiveDate::from_ymd_opt(2000, 1, 31).unwrap()
        );
    }

    #[tokio::test]
    async fn test_renew_persists_member() {
        use milo_domain::Insert;

        let db = milo_db::Connection::open_test().await;
        let plan = db.insert(plan(30)).await.unwrap();
        let member = db
            .insert(Member {
                member_id: "GYM001".to_string(),
                full_name: "Test Member".to_string(),
                phone: "9876543210".to_string(),
                membership_start: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                membership_expiry: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                status: MemberStatus::Expired,
                ..Default::default()
            })
            .await
            .unwrap();

        let paid_on = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let member = member.renew(&db, &plan, paid_on).await.unwrap();

        assert_eq!(member.plan_id, Some(plan.id));
        assert_eq!(member.membership_start, paid_on);
        assert_eq!(
            member.membership_expiry,
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()
        );
        assert_eq!(member.status, MemberStatus::Active);
    }
}
