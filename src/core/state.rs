//! Application State - Shared state of the application
//!
//! Holds the stores, the token service and both gates. Everything in here is
//! read-only after startup; the current month is read from the clock on demand.

use crate::core::identity::IdentityResolver;
use crate::core::temporal::{Clock, SystemClock, TemporalGate};
use crate::core::token::TokenService;
use crate::repositories::{
    AccountRepository, AccountStore, ExpenseRepository, ExpenseStore, LimitStore,
    SpendingLimitRepository,
};
use sqlx::MySqlPool;
use std::sync::Arc;

/// Global application state shared by every route and middleware
pub struct AppState {
    /// Account store
    pub accounts: Arc<dyn AccountStore>,

    /// Expense store
    pub expenses: Arc<ExpenseStore>,

    /// Spending limit store
    pub limits: Arc<LimitStore>,

    /// Issues and verifies identity tokens
    pub tokens: TokenService,

    /// Maps token emails to account ids
    pub identities: IdentityResolver,

    /// Past-month policy for financial records
    pub temporal: TemporalGate,
}

impl AppState {
    /// Creates the production state: MySQL repositories over `pool` and the
    /// system clock.
    ///
    /// # Arguments
    /// * `pool` - Shared MySQL connection pool
    /// * `tokens` - Token service built from the configured secret
    pub fn new(pool: MySqlPool, tokens: TokenService) -> Self {
        Self::with_stores(
            Arc::new(AccountRepository::new(pool.clone())),
            Arc::new(ExpenseRepository::new(pool.clone())),
            Arc::new(SpendingLimitRepository::new(pool)),
            tokens,
            Arc::new(SystemClock),
        )
    }

    pub fn with_stores(
        accounts: Arc<dyn AccountStore>,
        expenses: Arc<ExpenseStore>,
        limits: Arc<LimitStore>,
        tokens: TokenService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities: IdentityResolver::new(accounts.clone()),
            accounts,
            expenses,
            limits,
            tokens,
            temporal: TemporalGate::new(clock),
        }
    }
}
