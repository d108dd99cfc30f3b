use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{CheckIn, CheckInFilter, Payment, PaymentFilter, Query};

/// Membership status as stored in the `status` column.
/// Only payment-triggered renewal or a manual update changes it,
/// there is no background re-evaluation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    #[default]
    Inactive,
    Frozen,
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Frozen => "frozen",
            MemberStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "frozen" => Ok(MemberStatus::Frozen),
            "expired" => Ok(MemberStatus::Expired),
            other => Err(anyhow!("unknown member status: {}", other)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(anyhow!("unknown gender: {}", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: Option<MemberStatus>,
    pub plan_id: Option<u32>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    /// Business identifier, e.g. GYM001.
    pub member_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub plan_id: Option<u32>,
    pub membership_start: NaiveDate,
    pub membership_expiry: NaiveDate,
    pub status: MemberStatus,
    pub referred_by: Option<u32>,
    pub notes: String,
}

impl Member {
    /// Membership ran out before the given date.
    pub fn is_expired(&self, date: NaiveDate) -> bool {
        self.membership_expiry < date
    }

    /// Days left until expiry, negative when already expired.
    pub fn days_remaining(&self, date: NaiveDate) -> i64 {
        (self.membership_expiry - date).num_days()
    }

    /// Expiry falls within the warning window and has not passed yet.
    pub fn expiring_soon(&self, date: NaiveDate, days: u32) -> bool {
        !self.is_expired(date)
            && self.membership_expiry < date + Duration::days(days as i64)
    }

    pub async fn get_payments<DB>(&self, db: &DB) -> Result<Vec<Payment>>
    where
        DB: Query<Payment, Filter = PaymentFilter>,
    {
        let payments = db
            .query(&PaymentFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(payments)
    }

    pub async fn get_check_ins<DB>(&self, db: &DB) -> Result<Vec<CheckIn>>
    where
        DB: Query<CheckIn, Filter = CheckInFilter>,
    {
        let check_ins = db
            .query(&CheckInFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(check_ins)
    }
}
