use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use milo_domain::{Delete, Insert, Member, MemberFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                full_name,
                email,
                phone,
                date_of_birth,
                gender,
                address,
                emergency_contact_name,
                emergency_contact_phone,
                plan_id,
                membership_start,
                membership_expiry,
                status,
                referred_by,
                notes
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id.clone() {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND full_name LIKE ")
                .push_bind(format!("%{}%", name));
        }
        if let Some(phone) = filter.phone.clone() {
            qry.push(" AND phone = ").push_bind(phone);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(plan_id) = filter.plan_id {
            qry.push(" AND plan_id = ").push_bind(plan_id);
        }

        let members: Vec<Member> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    member_id,
                    full_name,
                    email,
                    phone,
                    date_of_birth,
                    gender,
                    address,
                    emergency_contact_name,
                    emergency_contact_phone,
                    plan_id,
                    membership_start,
                    membership_expiry,
                    status,
                    referred_by,
                    notes
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.member_id)
                .push_bind(&member.full_name)
                .push_bind(&member.email)
                .push_bind(&member.phone)
                .push_bind(member.date_of_birth)
                .push_bind(member.gender)
                .push_bind(&member.address)
                .push_bind(&member.emergency_contact_name)
                .push_bind(&member.emergency_contact_phone)
                .push_bind(member.plan_id)
                .push_bind(member.membership_start)
                .push_bind(member.membership_expiry)
                .push_bind(member.status)
                .push_bind(member.referred_by)
                .push_bind(&member.notes);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" member_id = ")
                .push_bind(&member.member_id)
                .push(", full_name = ")
                .push_bind(&member.full_name)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", phone = ")
                .push_bind(&member.phone)
                .push(", date_of_birth = ")
                .push_bind(member.date_of_birth)
                .push(", gender = ")
                .push_bind(member.gender)
                .push(", address = ")
                .push_bind(&member.address)
                .push(", emergency_contact_name = ")
                .push_bind(&member.emergency_contact_name)
                .push(", emergency_contact_phone = ")
                .push_bind(&member.emergency_contact_phone)
                .push(", plan_id = ")
                .push_bind(member.plan_id)
                .push(", membership_start = ")
                .push_bind(member.membership_start)
                .push(", membership_expiry = ")
                .push_bind(member.membership_expiry)
                .push(", status = ")
                .push_bind(member.status)
                .push(", referred_by = ")
                .push_bind(member.referred_by)
                .push(", notes = ")
                .push_bind(&member.notes)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
