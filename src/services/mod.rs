//! Services module - HTTP handlers
//!
//! One sub-module per resource. Handlers behind the authentication middleware
//! receive the caller as an `AuthUser` argument and never trust ids for
//! ownership that come from the body.

pub mod account;
pub mod auth;
pub mod expense;
pub mod spending_limit;

// Re-exports
pub use account::list_accounts;
pub use auth::{sign_in, sign_up};
pub use expense::{create_expense, delete_expense, list_expenses, update_expense};
pub use spending_limit::{create_limit, delete_limit, list_limits, update_limit};

use crate::AppState;
use crate::core::AppError;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

pub(crate) fn required_id(id: Option<i32>) -> Result<i32, AppError> {
    id.ok_or_else(|| AppError::bad_request("Record id is required"))
}

/// Largest amount a `DECIMAL(12, 2)` column holds.
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Accepts amounts the store keeps exactly and returns them with two decimal
/// places. Trailing zeros do not count against the scale.
pub(crate) fn valid_amount(amount: Decimal) -> Result<Decimal, AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::bad_request("Amount must be greater than zero"));
    }
    if amount.normalize().scale() > 2 {
        return Err(AppError::bad_request(
            "Amount must have at most two decimal places",
        ));
    }
    if amount > max_amount() {
        return Err(AppError::bad_request("Amount is too large")
            .with_details(format!("maximum is {}", max_amount())));
    }

    let mut amount = amount;
    amount.rescale(2);
    Ok(amount)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
