//! Hub-side half of a session
//!
//! A `SessionHandle` is what the registry stores: the session's identity and
//! the only strong sender of its outbound queue. The handle is deliberately
//! not `Clone`. Dropping it is how the hub closes the queue, which the write
//! pump observes as the signal to send a close frame and exit.

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::backend::auth::Identity;
use crate::shared::UserId;

/// One serialized outbound envelope (or several, see the write pump)
pub type Payload = Arc<str>;

/// Unique id of one accepted connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a failed non-blocking enqueue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError {
    /// The queue is at capacity
    Full,
    /// The session's write pump is gone
    Closed,
}

#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    identity: Identity,
    outbound: mpsc::Sender<Payload>,
}

impl SessionHandle {
    pub fn new(identity: Identity, outbound: mpsc::Sender<Payload>) -> Self {
        Self {
            id: SessionId::new(),
            identity,
            outbound,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    /// Enqueue without waiting for capacity
    pub fn try_enqueue(&self, payload: &Payload) -> Result<(), EnqueueError> {
        self.outbound
            .try_send(Arc::clone(payload))
            .map_err(|e| match e {
                TrySendError::Full(_) => EnqueueError::Full,
                TrySendError::Closed(_) => EnqueueError::Closed,
            })
    }
}
