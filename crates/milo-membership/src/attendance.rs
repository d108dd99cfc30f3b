use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error as ThisError;

use milo_domain::{CheckIn, Update};

#[derive(ThisError, Debug)]
pub enum CheckOutError {
    #[error("member has already checked out of this visit")]
    AlreadyCheckedOut,
}

#[async_trait]
pub trait CheckOut: Sized {
    /// Close an open gym visit.
    async fn check_out<DB>(self, db: &DB, at: NaiveDateTime) -> Result<CheckIn>
    where
        DB: Update<CheckIn> + Send + Sync;
}

#[async_trait]
impl CheckOut for CheckIn {
    /// Check-out is the single allowed mutation of a visit; a second
    /// attempt is rejected.
    async fn check_out<DB>(self, db: &DB, at: NaiveDateTime) -> Result<CheckIn>
    where
        DB: Update<CheckIn> + Send + Sync,
    {
        if self.check_out_time.is_some() {
            return Err(CheckOutError::AlreadyCheckedOut.into());
        }
        let check_in = CheckIn {
            check_out_time: Some(at),
            ..self
        };
        let check_in = db.update(check_in).await?;
        Ok(check_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use milo_db::Connection;
    use milo_domain::{Insert, Member};

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_check_out_once() {
        let db = Connection::open_test().await;
        let member = db
            .insert(Member {
                member_id: "GYM001".to_string(),
                full_name: "Test Member".to_string(),
                phone: "9876543210".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let visit = db
            .insert(CheckIn {
                member_id: member.id,
                check_in_time: at(7, 30),
                ..Default::default()
            })
            .await
            .unwrap();

        let visit = visit.check_out(&db, at(9, 0)).await.unwrap();
        assert_eq!(visit.check_out_time, Some(at(9, 0)));
        assert_eq!(
            visit.duration(),
            Some(chrono::Duration::minutes(90))
        );

        // The second check-out is rejected
        let result = visit.check_out(&db, at(9, 30)).await;
        assert!(result.is_err());
    }
}
