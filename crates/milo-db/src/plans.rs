use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use milo_domain::{Delete, Insert, MembershipPlan, PlanFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<MembershipPlan> for Connection {
    type Filter = PlanFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<MembershipPlan>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                name,
                duration_days,
                ROUND(price, 10) AS price,
                description,
                is_active
            FROM membership_plans
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(is_active) = filter.is_active {
            qry.push(" AND is_active = ").push_bind(is_active);
        }

        let plans: Vec<MembershipPlan> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(plans)
    }
}

#[async_trait]
impl Retrieve<MembershipPlan> for Connection {
    type Key = u32;
    async fn retrieve(&self, plan_id: Self::Key) -> Result<MembershipPlan> {
        let filter = PlanFilter {
            id: Some(plan_id),
            ..Default::default()
        };
        let plan = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(plan)
    }
}

#[async_trait]
impl Insert<MembershipPlan> for Connection {
    async fn insert(&self, plan: MembershipPlan) -> Result<MembershipPlan> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO membership_plans (
                    name,
                    duration_days,
                    price,
                    description,
                    is_active
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&plan.name)
                .push_bind(plan.duration_days)
                .push_bind(plan.price)
                .push_bind(&plan.description)
                .push_bind(plan.is_active);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<MembershipPlan> for Connection {
    async fn update(&self, plan: MembershipPlan) -> Result<MembershipPlan> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE membership_plans SET")
                .push(" name = ")
                .push_bind(&plan.name)
                .push(", duration_days = ")
                .push_bind(plan.duration_days)
                .push(", price = ")
                .push_bind(plan.price)
                .push(", description = ")
                .push_bind(&plan.description)
                .push(", is_active = ")
                .push_bind(plan.is_active)
                .push(" WHERE id = ")
                .push_bind(plan.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(plan.id).await
    }
}

#[async_trait]
impl Delete<MembershipPlan> for Connection {
    async fn delete(&self, plan: MembershipPlan) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM membership_plans WHERE id = ")
            .push_bind(plan.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plan_insert() {
        let db = Connection::open_test().await;
        let plan = MembershipPlan {
            name: "Monthly".to_string(),
            duration_days: 30,
            price: 500.0,
            description: Some("One month of access".to_string()),
            is_active: true,
            ..Default::default()
        };
        let plan = db.insert(plan).await.unwrap();

        assert!(plan.id > 0);
        assert_eq!(plan.name, "Monthly");
        assert_eq!(plan.duration_days, 30);
        assert_eq!(plan.price, 500.0);
        assert!(plan.is_active);
    }

    #[tokio::test]
    async fn test_plan_update_and_toggle() {
        let db = Connection::open_test().await;
        let plan = MembershipPlan {
            name: "Quarterly".to_string(),
            duration_days: 90,
            price: 1350.0,
            is_active: true,
            ..Default::default()
        };
        let mut plan = db.insert(plan).await.unwrap();
        plan.price = 1200.0;
        plan.is_active = false;

        let plan = db.update(plan).await.unwrap();
        assert_eq!(plan.price, 1200.0);
        assert!(!plan.is_active);
    }

    #[tokio::test]
    async fn test_plan_filter_active() {
        let db = Connection::open_test().await;
        db.insert(MembershipPlan {
            name: "Monthly".to_string(),
            duration_days: 30,
            price: 500.0,
            is_active: true,
            ..Default::default()
        })
        .await
        .unwrap();
        db.insert(MembershipPlan {
            name: "Legacy".to_string(),
            duration_days: 365,
            price: 4000.0,
            is_active: false,
            ..Default::default()
        })
        .await
        .unwrap();

        let plans: Vec<MembershipPlan> = db
            .query(&PlanFilter {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Monthly");
    }

    #[tokio::test]
    async fn test_plan_delete() {
        let db = Connection::open_test().await;
        let plan = db
            .insert(MembershipPlan {
                name: "Monthly".to_string(),
                duration_days: 30,
                price: 500.0,
                ..Default::default()
            })
            .await
            .unwrap();
        let id = plan.id;

        db.delete(plan).await.unwrap();

        let plan: Result<MembershipPlan> = db.retrieve(id).await;
        assert!(plan.is_err());
    }
}
