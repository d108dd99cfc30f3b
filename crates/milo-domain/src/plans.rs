use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PlanFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// A priced, fixed-duration subscription tier. Deactivating or deleting
/// a plan never touches members already referencing it.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: u32,
    pub name: String,
    pub duration_days: u32,
    pub price: f64,
    pub description: Option<String>,
    pub is_active: bool,
}
