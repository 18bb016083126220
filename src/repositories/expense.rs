//! ExpenseRepository - MySQL storage for expenses

use super::RecordStore;
use crate::dtos::{CreateExpenseDTO, UpdateExpenseDTO};
use crate::entities::Expense;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Error, MySqlPool};
use tracing::{debug, instrument};

pub struct ExpenseRepository {
    connection_pool: MySqlPool,
}

impl ExpenseRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl RecordStore<Expense, CreateExpenseDTO, UpdateExpenseDTO> for ExpenseRepository {
    #[instrument(skip(self, data))]
    async fn create(&self, account_id: i32, data: &CreateExpenseDTO) -> Result<Expense, Error> {
        let result = sqlx::query(
            "INSERT INTO expenses (account_id, description, amount, reference_month) VALUES (?, ?, ?, ?)",
        )
        .bind(account_id)
        .bind(&data.description)
        .bind(data.amount)
        .bind(data.reference_month)
        .execute(&self.connection_pool)
        .await?;

        Ok(Expense {
            id: result.last_insert_id() as i32,
            account_id,
            description: data.description.clone(),
            amount: data.amount,
            reference_month: data.reference_month,
        })
    }

    async fn read(&self, account_id: i32, id: i32) -> Result<Option<Expense>, Error> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, account_id, description, amount, reference_month
            FROM expenses
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(expense)
    }

    #[instrument(skip(self))]
    async fn list(&self, account_id: i32) -> Result<Vec<Expense>, Error> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, account_id, description, amount, reference_month
            FROM expenses
            WHERE account_id = ?
            ORDER BY reference_month ASC, id ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} expenses", expenses.len());
        Ok(expenses)
    }

    #[instrument(skip(self, data))]
    async fn update(
        &self,
        account_id: i32,
        id: i32,
        data: &UpdateExpenseDTO,
    ) -> Result<Expense, Error> {
        // MySQL reports 0 affected rows when nothing changed, so existence is
        // decided by reading the row back.
        sqlx::query(
            r#"
            UPDATE expenses
            SET description = ?, amount = ?, reference_month = COALESCE(?, reference_month)
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(&data.description)
        .bind(data.amount)
        .bind(data.reference_month)
        .bind(id)
        .bind(account_id)
        .execute(&self.connection_pool)
        .await?;

        self.read(account_id, id).await?.ok_or(Error::RowNotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, account_id: i32, id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reference_month(&self, account_id: i32, id: i32) -> Result<Option<NaiveDate>, Error> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT reference_month FROM expenses WHERE id = ? AND account_id = ?",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
