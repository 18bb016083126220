//! Expense entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Expense {
    pub id: i32,
    pub account_id: i32,
    pub description: String,
    pub amount: Decimal,
    // always the first day of the month
    pub reference_month: NaiveDate,
}
