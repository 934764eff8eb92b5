/**
 * WebSocket Upgrade Handler
 *
 * `GET /ws?token=<jwt>`
 *
 * The credential is checked by the `WsIdentity` extractor before the
 * upgrade is accepted, so a refused client never gets a socket and no
 * session state is allocated for it. Once upgraded, the connection is
 * handed to a `Session` which registers with the hub and runs until one of
 * its pumps ends.
 */
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};

use crate::backend::auth::Identity;
use crate::backend::hub::HubHandle;
use crate::backend::middleware::WsIdentity;
use crate::backend::session::{Session, SessionConfig};

pub async fn handle_ws_upgrade(
    WsIdentity(identity): WsIdentity,
    State(hub): State<HubHandle>,
    State(config): State<SessionConfig>,
    ws: WebSocketUpgrade,
) -> Response {
    tracing::debug!(user_id = identity.user_id, "Upgrading WebSocket connection");

    ws.max_message_size(config.max_message_size)
        .on_upgrade(move |socket| run_session(socket, identity, hub, config))
}

async fn run_session(socket: WebSocket, identity: Identity, hub: HubHandle, config: SessionConfig) {
    let user_id = identity.user_id;
    let reason = Session::serve(identity, hub, config, socket).await;
    tracing::debug!(user_id, %reason, "WebSocket connection closed");
}
