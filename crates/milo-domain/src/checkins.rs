use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntryMethod {
    #[default]
    Manual,
    Qr,
    Kiosk,
    Fingerprint,
}

impl EntryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMethod::Manual => "manual",
            EntryMethod::Qr => "qr",
            EntryMethod::Kiosk => "kiosk",
            EntryMethod::Fingerprint => "fingerprint",
        }
    }
}

impl fmt::Display for EntryMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(EntryMethod::Manual),
            "qr" => Ok(EntryMethod::Qr),
            "kiosk" => Ok(EntryMethod::Kiosk),
            "fingerprint" => Ok(EntryMethod::Fingerprint),
            other => Err(anyhow!("unknown entry method: {}", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckInFilter {
    pub id: Option<u32>,
    pub member_id: Option<u32>,
    /// Restrict to check-ins on this calendar day.
    pub day: Option<NaiveDate>,
    /// Only visits without a check-out yet.
    pub open_only: bool,
}

/// A gym visit. Check-out is the single allowed mutation after creation.
#[derive(Debug, Default, Clone, FromRow, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: u32,
    pub member_id: u32,
    pub check_in_time: NaiveDateTime,
    pub check_out_time: Option<NaiveDateTime>,
    pub entry_method: EntryMethod,
    pub notes: Option<String>,
}

impl CheckIn {
    /// Visit length, if the member has checked out.
    pub fn duration(&self) -> Option<Duration> {
        self.check_out_time.map(|out| out - self.check_in_time)
    }
}
