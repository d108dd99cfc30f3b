use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use milo_domain::{Insert, Payment, PaymentFilter, Query, Retrieve};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Payment> for Connection {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                ROUND(amount, 10) AS amount,
                method,
                status,
                payment_date,
                invoice_number,
                plan_id,
                notes
            FROM payments
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(method) = filter.method {
            qry.push(" AND method = ").push_bind(method);
        }
        if let Some(date) = filter.date {
            qry.push(" AND payment_date = ").push_bind(date);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND payment_date <= ").push_bind(date_before);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND payment_date >= ").push_bind(date_after);
        }

        let payments: Vec<Payment> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Connection {
    type Key = u32;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for Connection {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO payments (
                    member_id,
                    amount,
                    method,
                    status,
                    payment_date,
                    invoice_number,
                    plan_id,
                    notes
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.method)
                .push_bind(payment.status)
                .push_bind(payment.payment_date)
                .push_bind(&payment.invoice_number)
                .push_bind(payment.plan_id)
                .push_bind(&payment.notes);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use milo_domain::{Member, PaymentMethod, PaymentStatus};

    async fn test_member(db: &Connection) -> Member {
        db.insert(Member {
            member_id: "GYM001".to_string(),
            full_name: "Test Member".to_string(),
            phone: "9876543210".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_payment_insert() {
        let db = Connection::open_test().await;
        let m = test_member(&db).await;

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let payment = Payment {
            member_id: m.id,
            amount: 500.0,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Paid,
            payment_date: date,
            invoice_number: Some("INV-20250601-1234".to_string()),
            notes: Some("monthly fee".to_string()),
            ..Default::default()
        };

        let payment = db.insert(payment).await.unwrap();
        assert!(payment.id > 0);
        assert_eq!(payment.member_id, m.id);
        assert_eq!(payment.amount, 500.0);
        assert_eq!(payment.method, PaymentMethod::Cash);
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.payment_date, date);
        assert_eq!(
            payment.invoice_number,
            Some("INV-20250601-1234".to_string())
        );
        assert_eq!(payment.notes, Some("monthly fee".to_string()));
    }

    #[tokio::test]
    async fn test_payment_filter_date_range() {
        let db = Connection::open_test().await;
        let m = test_member(&db).await;

        for day in [1, 10, 20] {
            db.insert(Payment {
                member_id: m.id,
                amount: 100.0,
                payment_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let payments: Vec<Payment> = db
            .query(&PaymentFilter {
                date_after: Some(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()),
                date_before: Some(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(
            payments[0].payment_date,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
    }

    #[tokio::test]
    async fn test_payment_filter_status() {
        let db = Connection::open_test().await;
        let m = test_member(&db).await;

        db.insert(Payment {
            member_id: m.id,
            amount: 100.0,
            status: PaymentStatus::Paid,
            ..Default::default()
        })
        .await
        .unwrap();
        db.insert(Payment {
            member_id: m.id,
            amount: 200.0,
            status: PaymentStatus::Pending,
            ..Default::default()
        })
        .await
        .unwrap();

        let paid: Vec<Payment> = db
            .query(&PaymentFilter {
                status: Some(PaymentStatus::Paid),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].amount, 100.0);
    }
}
