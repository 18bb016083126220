//! Account services

use crate::core::{AppError, AppState, AuthUser};
use crate::dtos::AccountDTO;
use axum::extract::{Json, State};
use axum_macros::debug_handler;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

#[debug_handler]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let accounts = state.accounts.list().await?;
    debug!("Account {} listing {} accounts", user.id, accounts.len());
    let accounts: Vec<AccountDTO> = accounts.into_iter().map(AccountDTO::from).collect();
    Ok(Json(json!({ "accounts": accounts })))
}
