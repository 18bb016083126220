//! Entities module - Domain entities
//!
//! Every entity maps to a table in the database.

pub mod account;
pub mod expense;
pub mod spending_limit;

// Re-exports
pub use account::Account;
pub use expense::Expense;
pub use spending_limit::SpendingLimit;
