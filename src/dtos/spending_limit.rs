//! Spending limit DTOs

use crate::entities::SpendingLimit;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LimitDTO {
    pub id: i32,
    pub amount: Decimal,
    pub reference_month: NaiveDate,
}

impl From<SpendingLimit> for LimitDTO {
    fn from(value: SpendingLimit) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            reference_month: value.reference_month,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateLimitRequest {
    pub amount: Option<Decimal>,
    pub reference_month: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateLimitRequest {
    pub id: Option<i32>,
    pub amount: Option<Decimal>,
    pub reference_month: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateLimitDTO {
    pub amount: Decimal,
    pub reference_month: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UpdateLimitDTO {
    pub amount: Decimal,
    pub reference_month: Option<NaiveDate>,
}
