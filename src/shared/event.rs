/**
 * WebSocket Envelopes
 *
 * Every frame the hub writes is a JSON envelope `{type, data}`. Several
 * envelopes may share one frame, joined with `\n`, so clients must read each
 * frame as newline-delimited JSON records.
 *
 * Clients send the same envelope shape back. The hub only understands
 * `ping`; anything else is ignored without closing the connection.
 */
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::error::SharedError;
use crate::shared::message::{Message, UserId};

/// Delimiter placed between envelopes coalesced into one frame
pub const FRAME_DELIMITER: char = '\n';

/// Type of an outbound envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A chat message was stored for one of the connection's conversations
    NewMessage,
    /// Reply to a client `ping`
    Pong,
    /// Custom event type (used by broadcasts)
    #[serde(untagged)]
    Custom(String),
}

/// Envelope written to WebSocket clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerEnvelope {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ServerEnvelope {
    /// Create an envelope with an arbitrary payload
    pub fn new(event_type: EventType, data: Option<serde_json::Value>) -> Self {
        Self { event_type, data }
    }

    /// Create a `new_message` notification envelope
    pub fn new_message(message: &Message) -> Result<Self, SharedError> {
        let data = serde_json::to_value(message)?;
        Ok(Self::new(EventType::NewMessage, Some(data)))
    }

    /// Create the keepalive reply
    pub fn pong() -> Self {
        Self::new(EventType::Pong, None)
    }

    /// Serialize into the shared payload placed on outbound queues
    ///
    /// The payload is reference counted so a broadcast to many sessions
    /// serializes once.
    pub fn to_payload(&self) -> Result<Arc<str>, SharedError> {
        let json = serde_json::to_string(self)?;
        Ok(Arc::from(json))
    }
}

/// Control recognised by the hub in an inbound envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientControl {
    Ping,
    Ignored,
}

/// Envelope read from WebSocket clients
///
/// Chat fields are accepted for compatibility with the web client but the
/// hub does not act on them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ClientEnvelope {
    /// Parse raw frame bytes; `None` for anything that is not an envelope
    pub fn parse(raw: &[u8]) -> Option<Self> {
        serde_json::from_slice(raw).ok()
    }

    pub fn control(&self) -> ClientControl {
        match self.kind.as_str() {
            "ping" => ClientControl::Ping,
            _ => ClientControl::Ignored,
        }
    }
}
