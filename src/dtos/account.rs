//! Account DTOs

use crate::entities::Account;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Public view of an account, the password hash is never exposed
#[derive(Serialize, Deserialize, Debug)]
pub struct AccountDTO {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub birthdate: Option<NaiveDate>,
}

impl From<Account> for AccountDTO {
    fn from(value: Account) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            birthdate: value.birthdate,
        }
    }
}

#[derive(Deserialize, Debug, Validate)]
pub struct SignUpDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    pub password: String,

    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
}

/// DTO to create a new account (without id, password already hashed)
#[derive(Debug, Clone)]
pub struct CreateAccountDTO {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birthdate: Option<NaiveDate>,
}

#[derive(Deserialize, Debug)]
pub struct SignInDTO {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenDTO {
    pub token: String,
}
