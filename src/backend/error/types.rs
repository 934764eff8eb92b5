/**
 * Backend Error Types
 *
 * This module defines the errors an HTTP handler of the gateway can return.
 * Each one carries enough to pick a status code; `conversion.rs` turns them
 * into JSON responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Request-level problems detected by a handler, most commonly a notify or
 * broadcast body that does not decode.
 *
 * ## Unauthorized
 *
 * The upgrade request carried no token or a token that did not verify.
 *
 * ## Hub Unavailable
 *
 * The hub coordinator has stopped; nothing can be dispatched.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::TokenError;
use crate::backend::hub::HubError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chat_notify::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::bad_request("Invalid notification body");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. malformed body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Credential missing or refused
    #[error(transparent)]
    Unauthorized(#[from] TokenError),

    /// Hub coordinator is not running
    #[error(transparent)]
    Hub(#[from] HubError),

    /// Shared error (envelope serialization)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a `400 Bad Request` handler error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Hub(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
