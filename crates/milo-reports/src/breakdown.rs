use serde::{Deserialize, Serialize};

use milo_domain::{
    Expense, ExpenseCategory, Member, MembershipPlan, Payment, PaymentMethod,
    PaymentStatus, EXPENSE_CATEGORIES, PAYMENT_METHODS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCount {
    pub plan: String,
    pub members: usize,
}

/// Paid revenue grouped by payment method, every method present,
/// in declaration order.
pub fn method_totals(payments: &[Payment]) -> Vec<MethodTotal> {
    PAYMENT_METHODS
        .iter()
        .map(|&method| {
            let paid = payments
                .iter()
                .filter(|p| {
                    p.method == method && p.status == PaymentStatus::Paid
                })
                .collect::<Vec<_>>();
            MethodTotal {
                method,
                total: paid.iter().map(|p| p.amount).sum(),
                count: paid.len(),
            }
        })
        .collect()
}

/// Expenses grouped by category, every category present,
/// in declaration order.
pub fn expenses_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    EXPENSE_CATEGORIES
        .iter()
        .map(|&category| {
            let rows = expenses
                .iter()
                .filter(|e| e.category == category)
                .collect::<Vec<_>>();
            CategoryTotal {
                category,
                total: rows.iter().map(|e| e.amount).sum(),
                count: rows.len(),
            }
        })
        .collect()
}

/// Member count per plan, in the order the plans were fetched.
pub fn plan_distribution(
    members: &[Member],
    plans: &[MembershipPlan],
) -> Vec<PlanCount> {
    plans
        .iter()
        .map(|plan| PlanCount {
            plan: plan.name.clone(),
            members: members
                .iter()
                .filter(|m| m.plan_id == Some(plan.id))
                .count(),
        })
        .collect()
}
