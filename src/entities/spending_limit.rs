//! SpendingLimit entity - Monthly spending cap, at most one per account and month

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SpendingLimit {
    pub id: i32,
    pub account_id: i32,
    pub amount: Decimal,
    pub reference_month: NaiveDate,
}
