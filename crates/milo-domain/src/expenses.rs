use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Utilities,
    Salary,
    Equipment,
    Maintenance,
    Marketing,
    Rent,
    #[default]
    Other,
}

/// All categories, in display order.
pub const EXPENSE_CATEGORIES: [ExpenseCategory; 7] = [
    ExpenseCategory::Utilities,
    ExpenseCategory::Salary,
    ExpenseCategory::Equipment,
    ExpenseCategory::Maintenance,
    ExpenseCategory::Marketing,
    ExpenseCategory::Rent,
    ExpenseCategory::Other,
];

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Salary => "salary",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "utilities" => Ok(ExpenseCategory::Utilities),
            "salary" => Ok(ExpenseCategory::Salary),
            "equipment" => Ok(ExpenseCategory::Equipment),
            "maintenance" => Ok(ExpenseCategory::Maintenance),
            "marketing" => Ok(ExpenseCategory::Marketing),
            "rent" => Ok(ExpenseCategory::Rent),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(anyhow!("unknown expense category: {}", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub id: Option<u32>,
    pub category: Option<ExpenseCategory>,
    pub date_before: Option<NaiveDate>,
    pub date_after: Option<NaiveDate>,
}

/// Simple ledger row, no lifecycle beyond create and delete.
#[derive(Debug, Default, Clone, FromRow, Serialize, Deserialize)]
pub struct Expense {
    pub id: u32,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub description: String,
    pub expense_date: NaiveDate,
}
