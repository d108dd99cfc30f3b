use chrono::{Duration, NaiveDate};

/// Today as a naive date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The date a number of days before today.
pub fn days_ago(days: u32) -> NaiveDate {
    today() - Duration::days(days as i64)
}
