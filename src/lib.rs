//! MyEconomy server library - exposes the modules for main and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports of the main types
pub use crate::core::{AppError, AppState, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(configure_auth_routes())
        .merge(configure_account_routes(state.clone()))
        .merge(configure_expense_routes(state.clone()))
        .merge(configure_limit_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Public routes: sign up and sign in
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
}

fn configure_account_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/list", get(list_accounts))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_expense_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/expense", get(list_expenses))
        .route("/expense/create", post(create_expense))
        .route("/expense/update", put(update_expense))
        .route("/expense/delete", delete(delete_expense))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_limit_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/limit", get(list_limits))
        .route("/limit/create", post(create_limit))
        .route("/limit/update", put(update_limit))
        .route("/limit/delete", delete(delete_limit))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
