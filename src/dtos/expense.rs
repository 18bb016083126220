//! Expense DTOs

use crate::entities::Expense;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExpenseDTO {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    pub reference_month: NaiveDate,
}

impl From<Expense> for ExpenseDTO {
    fn from(value: Expense) -> Self {
        Self {
            id: value.id,
            description: value.description,
            amount: value.amount,
            reference_month: value.reference_month,
        }
    }
}

#[derive(Deserialize, Debug, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub reference_month: Option<String>,
}

#[derive(Deserialize, Debug, Validate)]
pub struct UpdateExpenseRequest {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    // absent keeps the current month
    pub reference_month: Option<String>,
}

/// DTO to insert a new expense (without id)
#[derive(Debug, Clone)]
pub struct CreateExpenseDTO {
    pub description: String,
    pub amount: Decimal,
    pub reference_month: NaiveDate,
}

/// DTO to update an expense
#[derive(Debug, Clone)]
pub struct UpdateExpenseDTO {
    pub description: String,
    pub amount: Decimal,
    pub reference_month: Option<NaiveDate>,
}
