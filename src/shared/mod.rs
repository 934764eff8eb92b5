//! Shared Module
//!
//! This module contains types that are shared between the hub and the
//! services that feed it. Everything here is plain serde data; nothing
//! depends on the server runtime.
//!
//! # Overview
//!
//! - `message` - the chat message carried inside notifications
//! - `event` - envelopes written to and read from WebSocket clients
//! - `notification` - the body of the cross-process notify request
//! - `error` - serialization and validation errors
//! - `config` - notifier configuration and configuration errors

/// Chat message data structure
pub mod message;

/// WebSocket envelopes
pub mod event;

/// Cross-process notification requests
pub mod notification;

/// Shared error types
pub mod error;

/// Notifier configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{Message, UserId};
pub use event::{ClientControl, ClientEnvelope, ServerEnvelope, EventType};
pub use notification::{BroadcastRequest, NotifyRequest, NEW_MESSAGE};
pub use error::SharedError;
pub use config::{ConfigError, NotifierConfig, NotifierConfigBuilder};
