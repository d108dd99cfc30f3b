use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use milo_domain::{CheckIn, CheckInFilter, Insert, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<CheckIn> for Connection {
    type Filter = CheckInFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<CheckIn>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                check_in_time,
                check_out_time,
                entry_method,
                notes
            FROM check_ins
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(day) = filter.day {
            qry.push(" AND date(check_in_time) = ").push_bind(day);
        }
        if filter.open_only {
            qry.push(" AND check_out_time IS NULL");
        }
        qry.push(" ORDER BY check_in_time DESC");

        let check_ins: Vec<CheckIn> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(check_ins)
    }
}

#[async_trait]
impl Retrieve<CheckIn> for Connection {
    type Key = u32;
    async fn retrieve(&self, check_in_id: Self::Key) -> Result<CheckIn> {
        let filter = CheckInFilter {
            id: Some(check_in_id),
            ..Default::default()
        };
        let check_in = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(check_in)
    }
}

#[async_trait]
impl Insert<CheckIn> for Connection {
    async fn insert(&self, check_in: CheckIn) -> Result<CheckIn> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO check_ins (
                    member_id,
                    check_in_time,
                    check_out_time,
                    entry_method,
                    notes
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(check_in.member_id)
                .push_bind(check_in.check_in_time)
                .push_bind(check_in.check_out_time)
                .push_bind(check_in.entry_method)
                .push_bind(&check_in.notes);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<CheckIn> for Connection {
    async fn update(&self, check_in: CheckIn) -> Result<CheckIn> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE check_ins SET")
                .push(" member_id = ")
                .push_bind(check_in.member_id)
                .push(", check_in_time = ")
                .push_bind(check_in.check_in_time)
                .push(", check_out_time = ")
                .push_bind(check_in.check_out_time)
                .push(", entry_method = ")
                .push_bind(check_in.entry_method)
                .push(", notes = ")
                .push_bind(&check_in.notes)
                .push(" WHERE id = ")
                .push_bind(check_in.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(check_in.id).await
    }
}
