use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::debug;

use obra_types::TokenClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("could not encode session token: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("invalid session token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub session_minutes: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, session_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            session_minutes,
        }
    }

    /// Issues a token for an authenticated account. `sub` carries the
    /// email, `role` the role name at issue time.
    pub fn issue(&self, email: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Encode)
    }

    /// Checks signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "session token rejected");
            TokenError::Invalid(e)
        })
    }
}
