use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error as ThisError;

use milo_domain::{
    Insert, Member, MembershipPlan, Payment, PaymentMethod, PaymentStatus,
    Retrieve, Update,
};

use crate::lifecycle::RenewMembership;

#[derive(ThisError, Debug)]
pub enum PaymentError {
    #[error("payment amount must be a non-zero number")]
    InvalidAmount,
}

/// Generate an invoice number for a payment date: INV-YYYYMMDD-XXXX
/// with a random four digit suffix. Collisions are not checked.
pub fn invoice_number(date: NaiveDate) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("INV-{}-{}", date.format("%Y%m%d"), suffix)
}

/// A payment as entered at the front desk.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: u32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub date: NaiveDate,
    /// Plan to apply when renewing.
    pub plan_id: Option<u32>,
    /// Renew the membership as part of this payment.
    pub renew: bool,
    pub notes: Option<String>,
}

impl Default for NewPayment {
    fn default() -> Self {
        Self {
            member_id: 0,
            amount: 0.0,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Paid,
            date: NaiveDate::default(),
            plan_id: None,
            renew: false,
            notes: None,
        }
    }
}

#[async_trait]
pub trait RecordPayment {
    /// Record the payment and apply the renewal side effect.
    async fn record<DB>(self, db: &DB) -> Result<Payment>
    where
        DB: Retrieve<Member, Key = u32>
            + Retrieve<MembershipPlan, Key = u32>
            + Insert<Payment>
            + Update<Member>
            + Send
            + Sync;
}

#[async_trait]
impl RecordPayment for NewPayment {
    /// Inserts the payment row, then, for a paid payment with the
    /// renewal flag and a plan, renews the membership with the payment
    /// date as the new start. The two writes are sequential; a failure
    /// of the insert aborts before the renewal is attempted.
    async fn record<DB>(self, db: &DB) -> Result<Payment>
    where
        DB: Retrieve<Member, Key = u32>
            + Retrieve<MembershipPlan, Key = u32>
            + Insert<Payment>
            + Update<Member>
            + Send
            + Sync,
    {
        if !self.amount.is_finite() || self.amount == 0.0 {
            return Err(PaymentError::InvalidAmount.into());
        }

        // The member must exist before anything is written.
        let member: Member = db.retrieve(self.member_id).await?;

        let payment = Payment {
            member_id: member.id,
            amount: self.amount,
            method: self.method,
            status: self.status,
            payment_date: self.date,
            invoice_number: Some(invoice_number(self.date)),
            plan_id: self.plan_id,
            notes: self.notes.clone(),
            ..Default::default()
        };
        let payment: Payment = db.insert(payment).await?;

        if self.renew && self.status == PaymentStatus::Paid {
            if let Some(plan_id) = self.plan_id {
                // A plan that cannot be fetched skips the renewal,
                // the payment row stays as recorded.
                let plan: Result<MembershipPlan> = db.retrieve(plan_id).await;
                if let Ok(plan) = plan {
                    member.renew(db, &plan, self.date).await?;
                }
            }
        }

        Ok(payment)
    }
}
