use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use milo_db::Connection;
use milo_domain::{
    Delete, Expense, ExpenseCategory, ExpenseFilter, Insert, Query, Retrieve,
};
use milo_membership::{datetime, validate};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Expenses {
    /// Add an expense
    #[clap(name = "add")]
    Add(AddExpense),
    /// List expenses
    #[clap(name = "list")]
    List(ListExpenses),
    /// Delete an expense
    #[clap(name = "delete")]
    Delete(DeleteExpense),
}

impl Expenses {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Expenses::Add(cmd) => cmd.run(db).await,
            Expenses::List(cmd) => cmd.run(db).await,
            Expenses::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddExpense {
    #[clap(short, long)]
    pub category: ExpenseCategory,
    #[clap(short, long)]
    pub amount: f64,
    #[clap(short, long)]
    pub description: String,
    /// Defaults to today
    #[clap(short = 'e', long)]
    pub date: Option<NaiveDate>,
}

impl AddExpense {
    pub async fn run(self, db: &Connection) -> Result<()> {
        validate::expense(self.amount, &self.description)?;

        let expense = Expense {
            category: self.category,
            amount: self.amount,
            description: self.description,
            expense_date: self.date.unwrap_or(datetime::today()),
            ..Default::default()
        };
        let expense = db.insert(expense).await?;
        println!("Expense added with id {}.", expense.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListExpenses {
    #[clap(short, long)]
    pub category: Option<ExpenseCategory>,
    #[clap(short, long)]
    pub after_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub before_date: Option<NaiveDate>,
}

impl ListExpenses {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = ExpenseFilter {
            category: self.category,
            date_after: self.after_date,
            date_before: self.before_date,
            ..Default::default()
        };

        let expenses: Vec<Expense> = db.query(&filter).await?;
        let total: f64 = expenses.iter().map(|e| e.amount).sum();
        println!("{} expenses, {:.2} total.", expenses.len(), total);
        expenses.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteExpense {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteExpense {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let expense: Expense = db.retrieve(self.id).await?;
        println!(
            "{}: {} ({:.2})",
            expense.expense_date, expense.description, expense.amount
        );
        let confirm =
            Confirm::new("Delete expense from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(expense).await?;
        Ok(())
    }
}
