//! Auth services - Sign up and sign in

use crate::core::{AppError, AppState};
use crate::dtos::{AccountDTO, CreateAccountDTO, SignInDTO, SignUpDTO, TokenDTO};
use crate::entities::Account;
use crate::services::is_unique_violation;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpDTO>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;

    if state.accounts.find_by_email(&body.email).await?.is_some() {
        warn!("Sign up with an email already registered");
        return Err(AppError::conflict("Account already exists"));
    }

    let password = Account::hash_password(&body.password)?;
    let new_account = CreateAccountDTO {
        name: body.name,
        email: body.email,
        password,
        birthdate: body.birthdate,
    };

    let account = state.accounts.create(&new_account).await.map_err(|e| {
        // concurrent sign up with the same email
        if is_unique_violation(&e) {
            AppError::conflict("Account already exists")
        } else {
            AppError::from(e)
        }
    })?;

    info!("Account {} registered", account.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created",
            "account": AccountDTO::from(account),
        })),
    ))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInDTO>,
) -> Result<Json<TokenDTO>, AppError> {
    let account = state
        .accounts
        .find_by_email(&body.email)
        .await?
        .filter(|account| account.verify_password(&body.password))
        .ok_or_else(|| {
            warn!("Sign in rejected");
            AppError::bad_request("Invalid email or password")
        })?;

    let token = state.tokens.issue(&account.email)?;
    info!("Account {} signed in", account.id);
    Ok(Json(TokenDTO { token }))
}
