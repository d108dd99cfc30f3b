use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use milo_domain::{Delete, Expense, ExpenseFilter, Insert, Query, Retrieve};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Expense> for Connection {
    type Filter = ExpenseFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Expense>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                category,
                ROUND(amount, 10) AS amount,
                description,
                expense_date
            FROM expenses
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(category) = filter.category {
            qry.push(" AND category = ").push_bind(category);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND expense_date <= ").push_bind(date_before);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND expense_date >= ").push_bind(date_after);
        }

        let expenses: Vec<Expense> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(expenses)
    }
}

#[async_trait]
impl Retrieve<Expense> for Connection {
    type Key = u32;
    async fn retrieve(&self, expense_id: Self::Key) -> Result<Expense> {
        let filter = ExpenseFilter {
            id: Some(expense_id),
            ..Default::default()
        };
        let expense = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(expense)
    }
}

#[async_trait]
impl Insert<Expense> for Connection {
    async fn insert(&self, expense: Expense) -> Result<Expense> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO expenses (
                    category,
                    amount,
                    description,
                    expense_date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(expense.category)
                .push_bind(expense.amount)
                .push_bind(&expense.description)
                .push_bind(expense.expense_date);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Delete<Expense> for Connection {
    async fn delete(&self, expense: Expense) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM expenses WHERE id = ")
            .push_bind(expense.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use milo_domain::ExpenseCategory;

    #[tokio::test]
    async fn test_expense_insert() {
        let db = Connection::open_test().await;
        let expense = Expense {
            category: ExpenseCategory::Rent,
            amount: 25000.0,
            description: "June rent".to_string(),
            expense_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            ..Default::default()
        };
        let expense = db.insert(expense).await.unwrap();

        assert!(expense.id > 0);
        assert_eq!(expense.category, ExpenseCategory::Rent);
        assert_eq!(expense.amount, 25000.0);
        assert_eq!(expense.description, "June rent");
    }

    #[tokio::test]
    async fn test_expense_filter_category() {
        let db = Connection::open_test().await;
        db.insert(Expense {
            category: ExpenseCategory::Rent,
            amount: 25000.0,
            description: "June rent".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        db.insert(Expense {
            category: ExpenseCategory::Equipment,
            amount: 1200.0,
            description: "Replacement dumbbells".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        let expenses: Vec<Expense> = db
            .query(&ExpenseFilter {
                category: Some(ExpenseCategory::Equipment),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Replacement dumbbells");
    }

    #[tokio::test]
    async fn test_expense_delete() {
        let db = Connection::open_test().await;
        let expense = db
            .insert(Expense {
                category: ExpenseCategory::Other,
                amount: 300.0,
                description: "Cleaning supplies".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = expense.id;

        db.delete(expense).await.unwrap();

        let expense: Result<Expense> = db.retrieve(id).await;
        assert!(expense.is_err());
    }
}
