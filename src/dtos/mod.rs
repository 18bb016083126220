//! DTOs module - Data Transfer Objects
//!
//! Request bodies arrive with optional fields so missing values can be
//! reported as domain rejections; handlers turn them into the validated
//! `Create*`/`Update*` DTOs the stores accept.

pub mod account;
pub mod expense;
pub mod spending_limit;

// Re-exports
pub use account::{AccountDTO, CreateAccountDTO, SignInDTO, SignUpDTO, TokenDTO};
pub use expense::{
    CreateExpenseDTO, CreateExpenseRequest, ExpenseDTO, UpdateExpenseDTO, UpdateExpenseRequest,
};
pub use spending_limit::{
    CreateLimitDTO, CreateLimitRequest, LimitDTO, UpdateLimitDTO, UpdateLimitRequest,
};

use serde::Deserialize;

/// Body of the delete endpoints
#[derive(Deserialize, Debug)]
pub struct RecordIdDTO {
    pub id: Option<i32>,
}
