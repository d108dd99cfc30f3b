use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use milo_db::Connection;
use milo_domain::{
    Member, Payment, PaymentFilter, PaymentMethod, PaymentStatus, Query,
    Retrieve,
};
use milo_membership::datetime;
use milo_membership::payments::{NewPayment, RecordPayment};

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// Record a payment
    #[clap(name = "record")]
    Record(RecordPaymentCmd),
    /// List payments
    #[clap(name = "list")]
    List(ListPayments),
}

impl Payments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Payments::Record(cmd) => cmd.run(db).await,
            Payments::List(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct RecordPaymentCmd {
    /// Member the payment is for
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub amount: f64,
    #[clap(short, long, default_value = "cash")]
    pub method: PaymentMethod,
    #[clap(short, long, default_value = "paid")]
    pub status: PaymentStatus,
    /// Payment date, defaults to today
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    /// Plan to renew the membership on
    #[clap(short, long)]
    pub plan: Option<u32>,
    /// Renew the membership as part of this payment
    #[clap(short, long)]
    pub renew: bool,
    #[clap(short = 'c', long)]
    pub notes: Option<String>,
}

impl RecordPaymentCmd {
    /// Run the command and record a payment
    pub async fn run(self, db: &Connection) -> Result<()> {
        let date = self.date.unwrap_or(datetime::today());
        let member: Member = db.retrieve(self.id).await?;

        let renew = if self.renew { " and renew membership" } else { "" };
        let prompt = format!(
            "Record {} payment of {:.2} for {} on {}{}?",
            self.method, self.amount, member.full_name, date, renew
        );
        let confirm = Confirm::new(&prompt).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let payment = NewPayment {
            member_id: member.id,
            amount: self.amount,
            method: self.method,
            status: self.status,
            date,
            plan_id: self.plan,
            renew: self.renew,
            notes: self.notes,
        }
        .record(db)
        .await?;

        let invoice = payment.invoice_number.unwrap_or_default();
        println!("Payment recorded with invoice {}.", invoice);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListPayments {
    #[clap(long)]
    pub member_id: Option<u32>,
    #[clap(long)]
    pub status: Option<PaymentStatus>,
    #[clap(short, long)]
    pub method: Option<PaymentMethod>,
    #[clap(short, long)]
    pub after_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub before_date: Option<NaiveDate>,
}

impl ListPayments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = PaymentFilter {
            member_id: self.member_id,
            status: self.status,
            method: self.method,
            date_after: self.after_date,
            date_before: self.before_date,
            ..Default::default()
        };

        let payments: Vec<Payment> = db.query(&filter).await?;
        println!(
            "{:>4}\t{:<12}\t{:<24}\t{:>10}\t{:<14}\t{:<8}\t{:<18}\t{}",
            "ID", "Date", "Member", "Amount", "Method", "Status", "Invoice", "Notes"
        );
        println!("{:-<180}", "-");
        for payment in payments {
            let member: Member = db.retrieve(payment.member_id).await?;
            let invoice = payment.invoice_number.unwrap_or_default();
            let notes = payment.notes.unwrap_or_default();
            println!(
                "{:>4}\t{:<12}\t{:<24}\t{:>10.2}\t{:<14}\t{:<8}\t{:<18}\t{}",
                payment.id,
                payment.payment_date.to_string(),
                member.full_name,
                payment.amount,
                payment.method.to_string(),
                payment.status.to_string(),
                invoice,
                notes
            );
        }

        Ok(())
    }
}
