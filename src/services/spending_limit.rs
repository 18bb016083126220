//! Spending limit services - One limit per account and month

use crate::core::{AppError, AppState, AuthUser};
use crate::dtos::{
    CreateLimitDTO, CreateLimitRequest, LimitDTO, RecordIdDTO, UpdateLimitDTO, UpdateLimitRequest,
};
use crate::services::{valid_amount, is_unique_violation, required_id};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fails with 409 if the account already has a limit for `month` other than `except`
async fn ensure_month_free(
    state: &AppState,
    account_id: i32,
    month: NaiveDate,
    except: Option<i32>,
) -> Result<(), AppError> {
    let taken = state
        .limits
        .list(account_id)
        .await?
        .iter()
        .any(|limit| limit.reference_month == month && Some(limit.id) != except);

    if taken {
        warn!("Spending limit already set for {}", month);
        return Err(AppError::conflict("A spending limit already exists for this month"));
    }
    Ok(())
}

fn map_store_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::conflict("A spending limit already exists for this month")
    } else {
        AppError::from(err)
    }
}

#[instrument(skip(state, user, body), fields(account_id = %user.id))]
pub async fn create_limit(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<CreateLimitRequest>,
) -> Result<(StatusCode, Json<LimitDTO>), AppError> {
    let (Some(amount), Some(reference_month)) = (body.amount, body.reference_month) else {
        return Err(AppError::bad_request("All fields must be filled"));
    };
    let amount = valid_amount(amount)?;

    let month = state.temporal.check_creation(&reference_month)?;
    ensure_month_free(&state, user.id, month.first_day(), None).await?;

    let new_limit = CreateLimitDTO {
        amount,
        reference_month: month.first_day(),
    };
    let limit = state
        .limits
        .create(user.id, &new_limit)
        .await
        .map_err(map_store_error)?;

    info!("Spending limit {} created for {}", limit.id, month);
    Ok((StatusCode::CREATED, Json(LimitDTO::from(limit))))
}

#[instrument(skip(state, user), fields(account_id = %user.id))]
pub async fn list_limits(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let limits: Vec<LimitDTO> = state
        .limits
        .list(user.id)
        .await?
        .into_iter()
        .map(LimitDTO::from)
        .collect();

    Ok(Json(json!({ "limits": limits })))
}

#[instrument(skip(state, user, body), fields(account_id = %user.id, limit_id = ?body.id))]
pub async fn update_limit(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<UpdateLimitRequest>,
) -> Result<Json<LimitDTO>, AppError> {
    let id = required_id(body.id)?;
    let Some(amount) = body.amount else {
        return Err(AppError::bad_request("All fields must be filled"));
    };
    let amount = valid_amount(amount)?;

    state
        .temporal
        .check_mutation(state.limits.as_ref(), user.id, id)
        .await?;

    if state.limits.read(user.id, id).await?.is_none() {
        warn!("Spending limit not found");
        return Err(AppError::not_found("Spending limit not found"));
    }

    let reference_month = match body.reference_month.as_deref() {
        Some(raw) => {
            let month = state.temporal.check_creation(raw)?.first_day();
            ensure_month_free(&state, user.id, month, Some(id)).await?;
            Some(month)
        }
        None => None,
    };

    let changes = UpdateLimitDTO {
        amount,
        reference_month,
    };
    let limit = state
        .limits
        .update(user.id, id, &changes)
        .await
        .map_err(map_store_error)?;

    info!("Spending limit updated");
    Ok(Json(LimitDTO::from(limit)))
}

#[instrument(skip(state, user, body), fields(account_id = %user.id, limit_id = ?body.id))]
pub async fn delete_limit(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<RecordIdDTO>,
) -> Result<Json<Value>, AppError> {
    let id = required_id(body.id)?;

    state
        .temporal
        .check_mutation(state.limits.as_ref(), user.id, id)
        .await?;

    if !state.limits.delete(user.id, id).await? {
        warn!("Spending limit not found");
        return Err(AppError::not_found("Spending limit not found"));
    }

    info!("Spending limit deleted");
    Ok(Json(json!({ "message": "Spending limit deleted" })))
}
