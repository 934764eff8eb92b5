//! Shared Error Types
//!
//! This module defines error types that are shared between the hub and the
//! services that talk to it.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use chat_notify::shared::error::SharedError;
//!
//! let error = SharedError::serialization("unexpected end of input");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the notify boundary
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
