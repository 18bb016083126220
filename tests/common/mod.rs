#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;
use myeconomy::core::{AppState, FixedClock, TokenService};
use myeconomy::dtos::{
    CreateAccountDTO, CreateExpenseDTO, CreateLimitDTO, UpdateExpenseDTO, UpdateLimitDTO,
};
use myeconomy::entities::{Account, Expense, SpendingLimit};
use myeconomy::repositories::{AccountStore, RecordStore};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const PASSWORD: &str = "Password123";

/// "Now" for every test: the current processing month is June 2025.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

pub fn amount(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

// ============================================================
// In-memory stores
// ============================================================

#[derive(Default)]
pub struct MemoryAccounts {
    rows: Mutex<Vec<Account>>,
    pub lookups: AtomicUsize,
    pub failing: AtomicBool,
}

impl MemoryAccounts {
    pub fn insert(&self, id: i32, name: &str, email: &str) {
        self.rows.lock().unwrap().push(Account {
            id,
            name: name.to_string(),
            email: email.to_string(),
            // low cost keeps the tests fast
            password: bcrypt::hash(PASSWORD, 4).unwrap(),
            birthdate: None,
        });
    }

    pub fn remove(&self, email: &str) {
        self.rows.lock().unwrap().retain(|a| a.email != email);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryAccounts {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create(&self, data: &CreateAccountDTO) -> Result<Account, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let account = Account {
            id: rows.iter().map(|a| a.id).max().unwrap_or(0) + 1,
            name: data.name.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
            birthdate: data.birthdate,
        };
        rows.push(account.clone());
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<Account>, sqlx::Error> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Fields the in-memory record store needs to see.
pub trait StoredRecord: Clone + Send + Sync {
    fn id(&self) -> i32;
    fn account_id(&self) -> i32;
    fn reference_month(&self) -> NaiveDate;
}

impl StoredRecord for Expense {
    fn id(&self) -> i32 {
        self.id
    }
    fn account_id(&self) -> i32 {
        self.account_id
    }
    fn reference_month(&self) -> NaiveDate {
        self.reference_month
    }
}

impl StoredRecord for SpendingLimit {
    fn id(&self) -> i32 {
        self.id
    }
    fn account_id(&self) -> i32 {
        self.account_id
    }
    fn reference_month(&self) -> NaiveDate {
        self.reference_month
    }
}

pub struct MemoryRecords<R> {
    rows: Mutex<Vec<R>>,
    /// inserts, updates and deletes that reached the store
    pub writes: AtomicUsize,
    pub failing: AtomicBool,
}

impl<R> Default for MemoryRecords<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }
}

impl<R: StoredRecord> MemoryRecords<R> {
    pub fn insert(&self, record: R) {
        self.rows.lock().unwrap().push(record);
    }

    pub fn get(&self, id: i32) -> Option<R> {
        self.rows.lock().unwrap().iter().find(|r| r.id() == id).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn next_id(&self) -> i32 {
        self.rows.lock().unwrap().iter().map(|r| r.id()).max().unwrap_or(0) + 1
    }

    fn find(&self, account_id: i32, id: i32) -> Option<R> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id && r.account_id() == account_id)
            .cloned()
    }

    fn owned_by(&self, account_id: i32) -> Vec<R> {
        let mut rows: Vec<R> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.account_id() == account_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.reference_month(), r.id()));
        rows
    }

    fn replace(&self, record: R) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(slot) = rows.iter_mut().find(|r| r.id() == record.id()) {
            *slot = record;
        }
    }

    fn remove(&self, account_id: i32, id: i32) -> bool {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id() == id && r.account_id() == account_id));
        rows.len() != before
    }
}

#[async_trait]
impl RecordStore<Expense, CreateExpenseDTO, UpdateExpenseDTO> for MemoryRecords<Expense> {
    async fn create(&self, account_id: i32, data: &CreateExpenseDTO) -> Result<Expense, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let expense = Expense {
            id: self.next_id(),
            account_id,
            description: data.description.clone(),
            amount: data.amount,
            reference_month: data.reference_month,
        };
        self.insert(expense.clone());
        Ok(expense)
    }

    async fn read(&self, account_id: i32, id: i32) -> Result<Option<Expense>, sqlx::Error> {
        self.check()?;
        Ok(self.find(account_id, id))
    }

    async fn list(&self, account_id: i32) -> Result<Vec<Expense>, sqlx::Error> {
        self.check()?;
        Ok(self.owned_by(account_id))
    }

    async fn update(
        &self,
        account_id: i32,
        id: i32,
        data: &UpdateExpenseDTO,
    ) -> Result<Expense, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut expense = self.find(account_id, id).ok_or(sqlx::Error::RowNotFound)?;
        expense.description = data.description.clone();
        expense.amount = data.amount;
        if let Some(month) = data.reference_month {
            expense.reference_month = month;
        }
        self.replace(expense.clone());
        Ok(expense)
    }

    async fn delete(&self, account_id: i32, id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.remove(account_id, id))
    }

    async fn reference_month(&self, account_id: i32, id: i32) -> Result<Option<NaiveDate>, sqlx::Error> {
        self.check()?;
        Ok(self.find(account_id, id).map(|r| r.reference_month))
    }
}

#[async_trait]
impl RecordStore<SpendingLimit, CreateLimitDTO, UpdateLimitDTO> for MemoryRecords<SpendingLimit> {
    async fn create(&self, account_id: i32, data: &CreateLimitDTO) -> Result<SpendingLimit, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let limit = SpendingLimit {
            id: self.next_id(),
            account_id,
            amount: data.amount,
            reference_month: data.reference_month,
        };
        self.insert(limit.clone());
        Ok(limit)
    }

    async fn read(&self, account_id: i32, id: i32) -> Result<Option<SpendingLimit>, sqlx::Error> {
        self.check()?;
        Ok(self.find(account_id, id))
    }

    async fn list(&self, account_id: i32) -> Result<Vec<SpendingLimit>, sqlx::Error> {
        self.check()?;
        Ok(self.owned_by(account_id))
    }

    async fn update(
        &self,
        account_id: i32,
        id: i32,
        data: &UpdateLimitDTO,
    ) -> Result<SpendingLimit, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut limit = self.find(account_id, id).ok_or(sqlx::Error::RowNotFound)?;
        limit.amount = data.amount;
        if let Some(month) = data.reference_month {
            limit.reference_month = month;
        }
        self.replace(limit.clone());
        Ok(limit)
    }

    async fn delete(&self, account_id: i32, id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.remove(account_id, id))
    }

    async fn reference_month(&self, account_id: i32, id: i32) -> Result<Option<NaiveDate>, sqlx::Error> {
        self.check()?;
        Ok(self.find(account_id, id).map(|r| r.reference_month))
    }
}

// ============================================================
// Test harness
// ============================================================

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub accounts: Arc<MemoryAccounts>,
    pub expenses: Arc<MemoryRecords<Expense>>,
    pub limits: Arc<MemoryRecords<SpendingLimit>>,
}

impl TestApp {
    /// Token for `email` signed with the test secret, valid for 30 minutes.
    pub fn token_for(&self, email: &str) -> String {
        self.state.tokens.issue(email).expect("Failed to issue token")
    }

    pub fn alice_token(&self) -> String {
        self.token_for("alice@example.com")
    }
}

/// Builds the app over in-memory stores with two accounts:
/// alice (id 1) and bob (id 2), both with password [`PASSWORD`].
pub fn create_test_app() -> TestApp {
    let accounts = Arc::new(MemoryAccounts::default());
    accounts.insert(1, "Alice", "alice@example.com");
    accounts.insert(2, "Bob", "bob@example.com");
    let expenses = Arc::new(MemoryRecords::<Expense>::default());
    let limits = Arc::new(MemoryRecords::<SpendingLimit>::default());

    let tokens = TokenService::new(JWT_SECRET, Duration::from_secs(1800))
        .expect("Failed to create token service");
    let state = Arc::new(AppState::with_stores(
        accounts.clone(),
        expenses.clone(),
        limits.clone(),
        tokens,
        Arc::new(FixedClock(today())),
    ));

    let server = TestServer::new(myeconomy::create_router(state.clone()))
        .expect("Failed to create test server");

    TestApp {
        server,
        state,
        accounts,
        expenses,
        limits,
    }
}

pub fn expense(id: i32, account_id: i32, reference_month: NaiveDate) -> Expense {
    Expense {
        id,
        account_id,
        description: format!("Expense {id}"),
        amount: amount("10.00"),
        reference_month,
    }
}

pub fn limit(id: i32, account_id: i32, reference_month: NaiveDate) -> SpendingLimit {
    SpendingLimit {
        id,
        account_id,
        amount: amount("500.00"),
        reference_month,
    }
}
