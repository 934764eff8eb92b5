/**
 * Notification Handlers
 *
 * `POST /notify` is how the request/response API tells the hub a message
 * was persisted. `POST /broadcast` pushes an arbitrary event to every
 * connected session.
 *
 * Bodies are taken as raw bytes and decoded here, so that every decoding
 * failure (bad JSON, missing field, wrong type) maps to the same `400`
 * response and nothing is dispatched.
 */
use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::backend::error::BackendError;
use crate::backend::hub::HubHandle;
use crate::shared::{BroadcastRequest, NotifyRequest, ServerEnvelope};

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        BackendError::bad_request("Invalid request")
    })
}

/// Dispatch a `new_message` notification to its recipients and sender
///
/// Other notification types are acknowledged without dispatch. A
/// `new_message` without a message is a bad request.
pub async fn handle_notify(
    State(hub): State<HubHandle>,
    body: Bytes,
) -> Result<Json<Value>, BackendError> {
    let request: NotifyRequest = decode(&body)?;

    if request.is_new_message() {
        let Some(message) = request.message.as_ref() else {
            tracing::debug!("Rejected new_message notification without a message");
            return Err(BackendError::bad_request("Invalid request"));
        };
        let payload = ServerEnvelope::new_message(message)?.to_payload()?;
        tracing::debug!(
            message_id = message.id,
            sender_id = message.sender_id,
            recipients = request.recipient_ids.len(),
            "Dispatching new_message notification"
        );
        hub.notify_targeted(payload, request.recipient_ids, message.sender_id)?;
    } else {
        tracing::debug!(kind = %request.kind, "Ignoring notification type");
    }

    Ok(Json(json!({ "status": "notification sent" })))
}

/// Deliver an event to every connected session
pub async fn handle_broadcast(
    State(hub): State<HubHandle>,
    body: Bytes,
) -> Result<Json<Value>, BackendError> {
    let request: BroadcastRequest = decode(&body)?;

    let payload = ServerEnvelope::new(request.event_type, request.data).to_payload()?;
    hub.broadcast_all(payload)?;

    Ok(Json(json!({ "status": "broadcast sent" })))
}
