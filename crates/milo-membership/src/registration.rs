use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error as ThisError;

use milo_domain::{
    Gender, Insert, Member, MemberFilter, MembershipPlan, Payment,
    PaymentMethod, PaymentStatus, Query, Retrieve,
};

use crate::lifecycle::StartMembership;
use crate::member_ids::next_member_id;
use crate::validate::{self, ValidationError};

#[derive(ThisError, Debug)]
pub enum RegistrationError {
    #[error("invalid membership plan")]
    UnknownPlan,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Registration form for a new member. The business identifier is
/// assigned during registration, never by the caller.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub plan_id: u32,
    pub start: NaiveDate,
    pub referred_by: Option<u32>,
    pub notes: String,
    /// Initial membership fee collected on signup.
    pub payment_amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
}

impl NewMember {
    fn validate(&self) -> Result<(), ValidationError> {
        validate::member_name(&self.full_name)?;
        validate::phone(&self.phone)?;
        if let Some(phone) = &self.emergency_contact_phone {
            validate::emergency_phone(phone)?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait Register {
    /// Register a member and record the initial membership fee.
    async fn register<DB>(self, db: &DB) -> Result<Member>
    where
        DB: Query<Member, Filter = MemberFilter>
            + Retrieve<MembershipPlan, Key = u32>
            + Insert<Member>
            + Insert<Payment>
            + Send
            + Sync;
}

#[async_trait]
impl Register for NewMember {
    /// Assigns the next free business identifier, computes the expiry
    /// from the plan duration and inserts the member as active,
    /// followed by the initial payment row. A missing plan aborts
    /// before anything is written.
    async fn register<DB>(self, db: &DB) -> Result<Member>
    where
        DB: Query<Member, Filter = MemberFilter>
            + Retrieve<MembershipPlan, Key = u32>
            + Insert<Member>
            + Insert<Payment>
            + Send
            + Sync,
    {
        self.validate().map_err(RegistrationError::Invalid)?;

        let plan: MembershipPlan = db
            .retrieve(self.plan_id)
            .await
            .map_err(|_| RegistrationError::UnknownPlan)?;

        // The next identifier is derived from the full set of
        // existing identifiers, tolerating gaps from deletions.
        let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
        let ids: Vec<String> =
            members.into_iter().map(|m| m.member_id).collect();
        let member_id = next_member_id(&ids);

        let member = Member {
            member_id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address.clone(),
            emergency_contact_name: self.emergency_contact_name.clone(),
            emergency_contact_phone: self.emergency_contact_phone.clone(),
            referred_by: self.referred_by,
            notes: self.notes.clone(),
            ..Default::default()
        }
        .start_membership(&plan, self.start);
        let member: Member = db.insert(member).await?;

        // Initial membership fee. Unlike renewals recorded later at
        // the front desk, this row carries no invoice number.
        let fee = Payment {
            member_id: member.id,
            amount: self.payment_amount,
            method: self.payment_method,
            status: PaymentStatus::Paid,
            payment_date: self.payment_date,
            plan_id: Some(plan.id),
            notes: Some("Initial membership fee".to_string()),
            ..Default::default()
        };
        let _: Payment = db.insert(fee).await?;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use milo_db::Connection;
    use milo_domain::MemberStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (Connection, MembershipPlan) {
        let db = Connection::open_test().await;
        let plan = db
            .insert(MembershipPlan {
                name: "Monthly".to_string(),
                duration_days: 30,
                price: 500.0,
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        (db, plan)
    }

    fn registration(plan: &MembershipPlan) -> NewMember {
        NewMember {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            plan_id: plan.id,
            start: date(2025, 6, 1),
            payment_amount: 500.0,
            payment_method: PaymentMethod::Cash,
            payment_date: date(2025, 6, 1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_member() {
        let (db, plan) = setup().await;

        let member = registration(&plan).register(&db).await.unwrap();

        assert_eq!(member.member_id, "GYM001");
        assert_eq!(member.full_name, "Asha Rao");
        assert_eq!(member.plan_id, Some(plan.id));
        assert_eq!(member.membership_start, date(2025, 6, 1));
        assert_eq!(member.membership_expiry, date(2025, 7, 1));
        assert_eq!(member.status, MemberStatus::Active);

        // Initial fee was recorded
        let payments = member.get_payments(&db).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, 500.0);
        assert_eq!(payments[0].status, PaymentStatus::Paid);
        assert_eq!(payments[0].invoice_number, None);
    }

    #[tokio::test]
    async fn test_register_assigns_sequential_ids() {
        let (db, plan) = setup().await;

        let first = registration(&plan).register(&db).await.unwrap();
        assert_eq!(first.member_id, "GYM001");

        let mut second = registration(&plan);
        second.phone = "8876543210".to_string();
        let second = second.register(&db).await.unwrap();
        assert_eq!(second.member_id, "GYM002");
    }

    #[tokio::test]
    async fn test_register_unknown_plan() {
        let (db, plan) = setup().await;

        let mut reg = registration(&plan);
        reg.plan_id = 4711;
        let result = reg.register(&db).await;
        assert!(result.is_err());

        // Nothing was written
        let members: Vec<Member> =
            db.query(&MemberFilter::default()).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_phone() {
        let (db, plan) = setup().await;

        let mut reg = registration(&plan);
        reg.phone = "1234567890".to_string();
        assert!(reg.register(&db).await.is_err());

        let mut reg = registration(&plan);
        reg.phone = "98765".to_string();
        assert!(reg.register(&db).await.is_err());
    }
}
