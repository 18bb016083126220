//! TokenService - Issues and verifies signed, time-limited identity tokens

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// Content of an identity token. The email is the only identity claim.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// The secret is missing or empty.
    #[error("token signing secret is not configured")]
    MissingSecret,

    /// Encoding the token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Bad signature, malformed token or expired token. Never more specific.
    #[error("invalid token")]
    Invalid,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[hidden]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, expiry: Duration) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::default();
        // Expiry is absolute: a token is dead the second after `exp`.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry,
        })
    }

    /// Issues a token for `email` valid from now for the configured expiry.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    #[instrument(skip(self, now), fields(email = %email))]
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        debug!("Encoding identity token");
        let iat = now.timestamp().max(0) as usize;
        let claims = Claims {
            email: email.to_string(),
            iat,
            exp: iat + self.expiry.as_secs() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to encode identity token: {:?}", e);
            TokenError::Signing(e.to_string())
        })
    }

    /// Verifies signature, structure and expiry, returning the email claim.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.email)
            .map_err(|e| {
                warn!("Rejected identity token: {:?}", e.kind());
                TokenError::Invalid
            })
    }
}
