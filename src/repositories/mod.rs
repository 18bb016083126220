//! Repositories module - Persistence layer
//!
//! One repository per table, all sharing the same MySQL connection pool.
//! Queries borrow a pooled connection for a single statement, so the
//! connection goes back to the pool on every exit path.

pub mod account;
pub mod expense;
pub mod spending_limit;
pub mod traits;

// Re-exports
pub use traits::{AccountStore, RecordStore};

pub use account::AccountRepository;
pub use expense::ExpenseRepository;
pub use spending_limit::SpendingLimitRepository;

use crate::dtos::{CreateExpenseDTO, CreateLimitDTO, UpdateExpenseDTO, UpdateLimitDTO};
use crate::entities::{Expense, SpendingLimit};

pub type ExpenseStore = dyn RecordStore<Expense, CreateExpenseDTO, UpdateExpenseDTO>;
pub type LimitStore = dyn RecordStore<SpendingLimit, CreateLimitDTO, UpdateLimitDTO>;
