//! AuthGate - Turns the Authorization header into an authenticated identity
//!
//! Every failure (missing header, bad token, unknown account) produces the
//! same 403 response; the reason only goes to the server log.

use crate::core::identity::IdentityResolver;
use crate::core::token::TokenService;
use crate::core::{AppError, AppState};
use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Identity attached to a request once the gate lets it through.
///
/// Handlers take it as an argument; it can only be extracted on routes
/// behind [`authentication_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

/// Strips the `Bearer ` prefix. Without the prefix the raw value is returned
/// and left to fail verification.
fn bearer_token(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}

/// Runs the whole gate on a raw header value.
pub async fn authenticate(
    tokens: &TokenService,
    identities: &IdentityResolver,
    header: Option<&HeaderValue>,
) -> Result<AuthUser, AppError> {
    let header = match header {
        Some(value) => value.to_str().map_err(|_| {
            warn!("Authorization header is not valid ASCII");
            AppError::forbidden()
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden());
        }
    };

    let email = tokens.verify(bearer_token(header))?;

    let id = identities
        .resolve_account_id(&email)
        .await
        .ok_or_else(AppError::forbidden)?;

    debug!("Request authenticated for account {}", id);
    Ok(AuthUser { id, email })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    let user = authenticate(
        &state.tokens,
        &state.identities,
        req.headers().get(AUTHORIZATION),
    )
    .await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            warn!("AuthUser requested on a route without the authentication middleware");
            AppError::forbidden()
        })
    }
}
