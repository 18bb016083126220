//! Expense services
//!
//! Mutations run in this order: required fields, temporal gate, existence
//! check, store. A rejected request never reaches the write statement.

use crate::core::{AppError, AppState, AuthUser};
use crate::dtos::{
    CreateExpenseDTO, CreateExpenseRequest, ExpenseDTO, RecordIdDTO, UpdateExpenseDTO,
    UpdateExpenseRequest,
};
use crate::services::{valid_amount, required_id};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, user, body), fields(account_id = %user.id))]
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseDTO>), AppError> {
    body.validate()?;
    let (Some(description), Some(amount), Some(reference_month)) =
        (body.description, body.amount, body.reference_month)
    else {
        return Err(AppError::bad_request("All fields must be filled"));
    };
    let amount = valid_amount(amount)?;

    let month = state.temporal.check_creation(&reference_month)?;

    let new_expense = CreateExpenseDTO {
        description,
        amount,
        reference_month: month.first_day(),
    };
    let expense = state.expenses.create(user.id, &new_expense).await?;

    info!("Expense {} created for {}", expense.id, month);
    Ok((StatusCode::CREATED, Json(ExpenseDTO::from(expense))))
}

#[instrument(skip(state, user), fields(account_id = %user.id))]
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let expenses: Vec<ExpenseDTO> = state
        .expenses
        .list(user.id)
        .await?
        .into_iter()
        .map(ExpenseDTO::from)
        .collect();

    Ok(Json(json!({ "expenses": expenses })))
}

#[instrument(skip(state, user, body), fields(account_id = %user.id, expense_id = ?body.id))]
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseDTO>, AppError> {
    body.validate()?;
    let id = required_id(body.id)?;
    let (Some(description), Some(amount)) = (body.description, body.amount) else {
        return Err(AppError::bad_request("All fields must be filled"));
    };
    let amount = valid_amount(amount)?;

    state
        .temporal
        .check_mutation(state.expenses.as_ref(), user.id, id)
        .await?;

    if state.expenses.read(user.id, id).await?.is_none() {
        warn!("Expense not found");
        return Err(AppError::not_found("Expense not found"));
    }

    // moving the record is a creation in the target month
    let reference_month = body
        .reference_month
        .as_deref()
        .map(|raw| state.temporal.check_creation(raw))
        .transpose()?
        .map(|month| month.first_day());

    let changes = UpdateExpenseDTO {
        description,
        amount,
        reference_month,
    };
    let expense = state.expenses.update(user.id, id, &changes).await?;

    info!("Expense updated");
    Ok(Json(ExpenseDTO::from(expense)))
}

#[instrument(skip(state, user, body), fields(account_id = %user.id, expense_id = ?body.id))]
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<RecordIdDTO>,
) -> Result<Json<Value>, AppError> {
    let id = required_id(body.id)?;

    state
        .temporal
        .check_mutation(state.expenses.as_ref(), user.id, id)
        .await?;

    if !state.expenses.delete(user.id, id).await? {
        warn!("Expense not found");
        return Err(AppError::not_found("Expense not found"));
    }

    info!("Expense deleted");
    Ok(Json(json!({ "message": "Expense deleted" })))
}
