//! Cross-process notification requests
//!
//! Bodies accepted by the hub's `POST /notify` and `POST /broadcast`
//! endpoints, and produced by [`crate::notifier::HubNotifier`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::event::EventType;
use crate::shared::message::{Message, UserId};

/// Notification type that triggers a targeted dispatch
pub const NEW_MESSAGE: &str = "new_message";

/// Body of `POST /notify`
///
/// Only `new_message` needs a `message`. A missing or `null` recipient list
/// reads as empty, which still notifies the sender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifyRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recipient_ids: Vec<UserId>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<UserId>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NotifyRequest {
    /// Build a `new_message` notification for the given recipients
    pub fn new_message(message: Message, recipient_ids: Vec<UserId>) -> Self {
        Self {
            kind: NEW_MESSAGE.to_string(),
            message: Some(message),
            recipient_ids,
        }
    }

    /// Whether this request should be dispatched at all
    ///
    /// Unknown types are acknowledged by the gateway but not delivered.
    pub fn is_new_message(&self) -> bool {
        self.kind == NEW_MESSAGE
    }
}

/// Body of `POST /broadcast`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastRequest {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
