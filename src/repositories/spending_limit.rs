//! SpendingLimitRepository - MySQL storage for monthly spending limits

use super::RecordStore;
use crate::dtos::{CreateLimitDTO, UpdateLimitDTO};
use crate::entities::SpendingLimit;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Error, MySqlPool};
use tracing::instrument;

pub struct SpendingLimitRepository {
    connection_pool: MySqlPool,
}

impl SpendingLimitRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl RecordStore<SpendingLimit, CreateLimitDTO, UpdateLimitDTO> for SpendingLimitRepository {
    /// Fails with a unique violation if the account already has a limit for the month
    #[instrument(skip(self, data))]
    async fn create(&self, account_id: i32, data: &CreateLimitDTO) -> Result<SpendingLimit, Error> {
        let result = sqlx::query(
            "INSERT INTO spending_limits (account_id, amount, reference_month) VALUES (?, ?, ?)",
        )
        .bind(account_id)
        .bind(data.amount)
        .bind(data.reference_month)
        .execute(&self.connection_pool)
        .await?;

        Ok(SpendingLimit {
            id: result.last_insert_id() as i32,
            account_id,
            amount: data.amount,
            reference_month: data.reference_month,
        })
    }

    async fn read(&self, account_id: i32, id: i32) -> Result<Option<SpendingLimit>, Error> {
        sqlx::query_as::<_, SpendingLimit>(
            "SELECT id, account_id, amount, reference_month FROM spending_limits WHERE id = ? AND account_id = ?",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    async fn list(&self, account_id: i32) -> Result<Vec<SpendingLimit>, Error> {
        sqlx::query_as::<_, SpendingLimit>(
            r#"
            SELECT id, account_id, amount, reference_month
            FROM spending_limits
            WHERE account_id = ?
            ORDER BY reference_month ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    #[instrument(skip(self, data))]
    async fn update(
        &self,
        account_id: i32,
        id: i32,
        data: &UpdateLimitDTO,
    ) -> Result<SpendingLimit, Error> {
        sqlx::query(
            r#"
            UPDATE spending_limits
            SET amount = ?, reference_month = COALESCE(?, reference_month)
            WHERE id = ? AND account_id = ?
            "#,
        )
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
        let result = sqlx::query("DELETE FROM spending_limits WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reference_month(&self, account_id: i32, id: i32) -> Result<Option<NaiveDate>, Error> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT reference_month FROM spending_limits WHERE id = ? AND account_id = ?",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
