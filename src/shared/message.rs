/**
 * Message Data Structure
 *
 * This module defines the chat message that the API side persists and then
 * hands to the hub inside a `new_message` notification. The hub never reads
 * the content; it only needs `sender_id` to echo the notification back to
 * the sender's own connection.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier issued by the API side
pub type UserId = i64;

/// Represents a single persisted chat message
///
/// # Fields
/// * `id` - Database id assigned by the API side
/// * `sender_id` - User who sent the message
/// * `content` - Text body (may be empty for media messages)
/// * `message_type` - Delivery mode, `direct` or `broadcast`
/// * `media_url` / `media_type` - Present when an attachment was uploaded
/// * `created_at` - When the API side stored the message
/// * `sender_username` - Display name of the sender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sender_username: String,
}

impl Message {
    /// Create a direct text message stamped with the current time
    pub fn text(id: i64, sender_id: UserId, sender_username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            content: content.into(),
            message_type: "direct".to_string(),
            media_url: None,
            media_type: None,
            created_at: Utc::now(),
            sender_username: sender_username.into(),
        }
    }
}
