//! Session Module
//!
//! One accepted WebSocket connection: its outbound queue, its two pumps and
//! its registration with the hub.
//!
//! # Module Structure
//!
//! ```text
//! session/
//! ├── mod.rs          - Session driver (open, run)
//! ├── config.rs       - Queue capacity, frame limit and timers
//! ├── handle.rs       - SessionHandle stored by the hub
//! ├── lifecycle.rs    - SessionState machine and close reasons
//! └── pumps.rs        - Read and write pumps
//! ```
//!
//! # Teardown
//!
//! Whichever pump ends first ends the session. The session then asks the hub
//! to unregister it, which drops the queue's only strong sender. If the read
//! side ended first the write pump is given `write_wait` to observe that and
//! send a close frame.

pub mod config;
pub mod handle;
pub mod lifecycle;
pub mod pumps;

pub use config::SessionConfig;
pub use handle::{EnqueueError, Payload, SessionHandle, SessionId};
pub use lifecycle::{CloseReason, SessionState};

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::backend::auth::Identity;
use crate::backend::hub::{HubError, HubHandle};

/// Connection-side half of a session
pub struct Session {
    id: SessionId,
    identity: Identity,
    outbound: mpsc::Receiver<Payload>,
    replies: mpsc::WeakSender<Payload>,
    hub: HubHandle,
    config: SessionConfig,
    state: SessionState,
}

enum First {
    Reader(CloseReason),
    Writer(CloseReason),
}

impl Session {
    /// Create the outbound queue and register with the hub
    ///
    /// `identity` has already passed the credential check. The returned
    /// session is `Active`: the hub will start enqueueing as soon as it
    /// processes the registration.
    pub fn open(identity: Identity, hub: HubHandle, config: SessionConfig) -> Result<Self, HubError> {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let replies = tx.downgrade();
        let handle = SessionHandle::new(identity.clone(), tx);
        let id = handle.id();

        let mut state = SessionState::Connecting;
        state.transition(SessionState::Authenticated);
        if let Err(e) = hub.register(handle) {
            state.transition(SessionState::Closed);
            tracing::warn!(user_id = identity.user_id, ?state, "Session not registered: {}", e);
            return Err(e);
        }
        state.transition(SessionState::Active);

        Ok(Self {
            id,
            identity,
            outbound: rx,
            replies,
            hub,
            config,
            state,
        })
    }

    /// Open a session over an upgraded socket and run it to completion
    ///
    /// If the hub is gone the socket only gets a close frame.
    pub async fn serve<S>(identity: Identity, hub: HubHandle, config: SessionConfig, socket: S) -> CloseReason
    where
        S: Stream<Item = Result<Message, axum::Error>> + Sink<Message, Error = axum::Error>,
    {
        let user_id = identity.user_id;
        match Session::open(identity, hub, config) {
            Ok(session) => session.run(socket).await,
            Err(e) => {
                tracing::debug!(user_id, "Closing upgraded socket: {}", e);
                tokio::pin!(socket);
                if let Err(e) = socket.send(Message::Close(None)).await {
                    tracing::debug!(user_id, "Failed to send close frame: {}", e);
                }
                CloseReason::HubUnavailable
            }
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive both pumps over `socket` until the session ends
    pub async fn run<S>(self, socket: S) -> CloseReason
    where
        S: Stream<Item = Result<Message, axum::Error>> + Sink<Message, Error = axum::Error>,
    {
        let Session {
            id,
            identity,
            outbound,
            replies,
            hub,
            config,
            mut state,
        } = self;

        let (sink, stream) = socket.split();
        let reader = pumps::read_pump(stream, replies, &config);
        let writer = pumps::write_pump(sink, outbound, &config);
        tokio::pin!(reader);
        tokio::pin!(writer);

        let first = tokio::select! {
            reason = &mut reader => First::Reader(reason),
            reason = &mut writer => First::Writer(reason),
        };
        state.transition(SessionState::Closing);

        if hub.unregister(id).is_err() {
            tracing::debug!(session_id = %id, "Hub stopped before session unregistered");
        }

        let reason = match first {
            First::Reader(reason) => {
                if timeout(config.write_wait, writer).await.is_err() {
                    tracing::debug!(session_id = %id, "Write pump did not finish after read side closed");
                }
                reason
            }
            First::Writer(reason) => reason,
        };
        state.transition(SessionState::Closed);

        tracing::debug!(
            session_id = %id,
            user_id = identity.user_id,
            %reason,
            ?state,
            "Session ended"
        );
        reason
    }
}
