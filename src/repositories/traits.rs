//! Store traits
//!
//! The core talks to persistence only through these interfaces. The MySQL
//! repositories implement them for production; tests plug in in-memory stores.

use crate::dtos::CreateAccountDTO;
use crate::entities::Account;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Account lookups and registration.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Finds the account with exactly this email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email
    /// * `Err(sqlx::Error)` - Error during reading
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error>;

    /// Creates a new account. `data.password` must already be hashed.
    async fn create(&self, data: &CreateAccountDTO) -> Result<Account, sqlx::Error>;

    /// Lists every account
    async fn list(&self) -> Result<Vec<Account>, sqlx::Error>;
}

/// Financial records owned by an account (expenses, spending limits).
///
/// Every method is scoped by `account_id`: a record owned by another account
/// behaves exactly like a missing one.
///
/// # Type Parameters
/// * `Record` - Entity returned by the store
/// * `CreateData` - Validated data for insertion (no ID)
/// * `UpdateData` - Validated data for updating
#[async_trait]
pub trait RecordStore<Record, CreateData, UpdateData>: Send + Sync {
    /// Inserts a new record for the account
    ///
    /// # Returns
    /// * `Ok(Record)` - Created record with ID assigned by the store
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, account_id: i32, data: &CreateData) -> Result<Record, sqlx::Error>;

    /// Reads a single record by primary key
    async fn read(&self, account_id: i32, id: i32) -> Result<Option<Record>, sqlx::Error>;

    /// Lists the account's records, oldest month first
    async fn list(&self, account_id: i32) -> Result<Vec<Record>, sqlx::Error>;

    /// Updates an existing record
    ///
    /// # Returns
    /// * `Ok(Record)` - Updated record
    /// * `Err(sqlx::Error::RowNotFound)` - No such record for this account
    async fn update(&self, account_id: i32, id: i32, data: &UpdateData)
    -> Result<Record, sqlx::Error>;

    /// Deletes a record
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - No such record for this account
    async fn delete(&self, account_id: i32, id: i32) -> Result<bool, sqlx::Error>;

    /// Returns only the persisted reference month of a record
    async fn reference_month(&self, account_id: i32, id: i32)
    -> Result<Option<NaiveDate>, sqlx::Error>;
}
