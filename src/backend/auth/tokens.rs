/**
 * Token Validation
 *
 * This module verifies the signed credential a client presents on the
 * WebSocket upgrade request and turns it into an `Identity`.
 *
 * Tokens are HS256 JWTs minted by the API side with the same shared secret.
 * The `exp` claim is mandatory; a token without it is malformed.
 */
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::shared::UserId;

/// Lifetime of tokens issued by [`TokenValidator::issue_default`]
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: u64,
}

/// Authenticated identity extracted from a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}

/// Why a credential was refused
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token required")]
    Missing,
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("failed to sign token")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// Verifies and issues tokens with one shared secret
#[derive(Clone)]
pub struct TokenValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate the credential carried on an upgrade request
    ///
    /// # Errors
    ///
    /// * `TokenError::Missing` - no token, or an empty one
    /// * `TokenError::Expired` - `exp` is in the past
    /// * `TokenError::InvalidSignature` - signed with a different secret
    /// * `TokenError::Malformed` - anything else
    pub fn validate(&self, token: Option<&str>) -> Result<Identity, TokenError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;

        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(Identity {
            user_id: data.claims.user_id,
            username: data.claims.username,
        })
    }

    /// Mint a token for `user_id` that expires after `ttl`
    pub fn issue(&self, user_id: UserId, username: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = Claims {
            user_id,
            username: username.to_string(),
            exp: now + ttl.as_secs(),
            iat: now,
        };
        self.sign(&claims)
    }

    /// Mint a token with the API side's standard lifetime
    pub fn issue_default(&self, user_id: UserId, username: &str) -> Result<String, TokenError> {
        self.issue(user_id, username, DEFAULT_TOKEN_TTL)
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to sign token: {:?}", e);
            TokenError::Signing
        })
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
