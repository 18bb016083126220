//! AccountRepository - MySQL storage for accounts

use super::AccountStore;
use crate::dtos::CreateAccountDTO;
use crate::entities::Account;
use async_trait::async_trait;
use sqlx::{Error, MySqlPool};
use tracing::{debug, instrument};

pub struct AccountRepository {
    connection_pool: MySqlPool,
}

impl AccountRepository {
    pub fn new(connection_pool: MySqlPool) -> AccountRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    /// Email is unique, so at most one row matches
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        debug!("Looking up account by email");
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password, birthdate FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self, data), fields(email = %data.email))]
    async fn create(&self, data: &CreateAccountDTO) -> Result<Account, Error> {
        let result = sqlx::query(
            "INSERT INTO accounts (name, email, password, birthdate) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password)
        .bind(data.birthdate)
        .execute(&self.connection_pool)
        .await?;

        Ok(Account {
            id: result.last_insert_id() as i32,
            name: data.name.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
            birthdate: data.birthdate,
        })
    }

    async fn list(&self) -> Result<Vec<Account>, Error> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password, birthdate FROM accounts ORDER BY id",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(accounts)
    }
}
