//! Core Module - Infrastructure of the application
//!
//! - Identity tokens, identity resolution and the authentication gate
//! - Temporal gate for financial records
//! - Configuration
//! - Error handling
//! - Application state

pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod state;
pub mod temporal;
pub mod token;

// Re-exports
pub use auth::{AuthUser, authentication_middleware};
pub use config::Config;
pub use error::AppError;
pub use identity::IdentityResolver;
pub use state::AppState;
pub use temporal::{Clock, FixedClock, ReferenceMonth, SystemClock, TemporalError, TemporalGate};
pub use token::{TokenError, TokenService};
