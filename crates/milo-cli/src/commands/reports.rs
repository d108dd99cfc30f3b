use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use milo_db::Connection;
use milo_domain::{
    CheckIn, CheckInFilter, Expense, ExpenseFilter, Member, MemberFilter,
    MembershipPlan, Payment, PaymentFilter, PlanFilter, Query,
};
use milo_membership::datetime;
use milo_reports::{
    attendance_by_day, dashboard_stats, expenses_by_category, method_totals,
    plan_distribution, revenue_by_day, revenue_by_month,
};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Reports {
    /// Headline numbers for today
    #[clap(name = "dashboard")]
    Dashboard(Dashboard),
    /// Revenue over time
    #[clap(name = "revenue")]
    Revenue(Revenue),
    /// Check-ins over time
    #[clap(name = "attendance")]
    Attendance(Attendance),
    /// Members per plan
    #[clap(name = "plans")]
    Plans(PlanReport),
    /// Expense totals by category
    #[clap(name = "expenses")]
    Expenses(ExpenseReport),
}

impl Reports {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Reports::Dashboard(cmd) => cmd.run(db).await,
            Reports::Revenue(cmd) => cmd.run(db).await,
            Reports::Attendance(cmd) => cmd.run(db).await,
            Reports::Plans(cmd) => cmd.run(db).await,
            Reports::Expenses(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct Dashboard {}

impl Dashboard {
    /// Recompute the dashboard from a fresh snapshot
    pub async fn run(self, db: &Connection) -> Result<()> {
        let members: Vec<Member> =
            db.query(&MemberFilter::default()).await?;
        let payments: Vec<Payment> =
            db.query(&PaymentFilter::default()).await?;
        let check_ins: Vec<CheckIn> =
            db.query(&CheckInFilter::default()).await?;

        let stats =
            dashboard_stats(&members, &payments, &check_ins, datetime::today());
        println!();
        stats.print_formatted();
        println!();

        println!("Revenue by payment method:");
        for total in method_totals(&payments) {
            println!(
                "{:<16}\t{:>12.2}\t({} payments)",
                total.method.to_string(),
                total.total,
                total.count
            );
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Revenue {
    /// Start of the range, defaults to 30 days ago
    #[clap(short, long)]
    pub from: Option<NaiveDate>,
    /// End of the range, defaults to today
    #[clap(short, long)]
    pub to: Option<NaiveDate>,
    /// Group by calendar month instead of day
    #[clap(short, long)]
    pub monthly: bool,
}

impl Revenue {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let payments: Vec<Payment> =
            db.query(&PaymentFilter::default()).await?;

        if self.monthly {
            println!("{:<10}\t{:>12}", "Month", "Revenue");
            println!("{:-<40}", "-");
            for point in revenue_by_month(&payments) {
                println!(
                    "{:<10}\t{:>12.2}",
                    point.month.format("%Y-%m").to_string(),
                    point.revenue
                );
            }
            return Ok(());
        }

        let from = self.from.unwrap_or(datetime::days_ago(29));
        let to = self.to.unwrap_or(datetime::today());
        println!("{:<12}\t{:>12}", "Date", "Revenue");
        println!("{:-<40}", "-");
        for point in revenue_by_day(&payments, from, to) {
            println!("{:<12}\t{:>12.2}", point.date.to_string(), point.revenue);
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Attendance {
    /// Start of the range, defaults to 30 days ago
    #[clap(short, long)]
    pub from: Option<NaiveDate>,
    /// End of the range, defaults to today
    #[clap(short, long)]
    pub to: Option<NaiveDate>,
}

impl Attendance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let check_ins: Vec<CheckIn> =
            db.query(&CheckInFilter::default()).await?;

        let from = self.from.unwrap_or(datetime::days_ago(29));
        let to = self.to.unwrap_or(datetime::today());
        println!("{:<12}\t{:>10}", "Date", "Check-ins");
        println!("{:-<40}", "-");
        for point in attendance_by_day(&check_ins, from, to) {
            println!("{:<12}\t{:>10}", point.date.to_string(), point.check_ins);
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PlanReport {}

impl PlanReport {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let members: Vec<Member> =
            db.query(&MemberFilter::default()).await?;
        let plans: Vec<MembershipPlan> =
            db.query(&PlanFilter::default()).await?;

        println!("{:<24}\t{:>8}", "Plan", "Members");
        println!("{:-<40}", "-");
        for count in plan_distribution(&members, &plans) {
            println!("{:<24}\t{:>8}", count.plan, count.members);
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ExpenseReport {}

impl ExpenseReport {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let expenses: Vec<Expense> =
            db.query(&ExpenseFilter::default()).await?;

        println!("{:<16}\t{:>12}\t{:>8}", "Category", "Total", "Count");
        println!("{:-<48}", "-");
        for total in expenses_by_category(&expenses) {
            println!(
                "{:<16}\t{:>12.2}\t{:>8}",
                total.category.to_string(),
                total.total,
                total.count
            );
        }

        Ok(())
    }
}
