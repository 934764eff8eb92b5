/**
 * Session Lifecycle
 *
 * ```text
 * Connecting ──► Authenticated ──► Active ──► Closing ──► Closed
 *      │
 *      └──► Rejected
 * ```
 *
 * `Closing` is entered at most once, from `Active`, whatever the cause.
 */
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Upgrade request received, credential not yet checked
    Connecting,
    /// Credential accepted, transport upgraded, not yet registered
    Authenticated,
    /// Registered with the hub, both pumps running
    Active,
    /// Teardown started
    Closing,
    Closed,
    /// Credential refused; no resources were allocated
    Rejected,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Connecting, Authenticated)
                | (Connecting, Rejected)
                | (Authenticated, Active)
                | (Authenticated, Closed)
                | (Active, Closing)
                | (Closing, Closed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed | SessionState::Rejected)
    }

    /// Move to `next` if the edge is legal; returns whether it moved
    pub fn transition(&mut self, next: SessionState) -> bool {
        if self.can_transition_to(next) {
            *self = next;
            true
        } else {
            tracing::debug!(from = ?self, to = ?next, "Ignoring illegal session transition");
            false
        }
    }
}

/// Why a session left `Active`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer sent a close frame or ended the stream
    ClientClosed,
    /// Reading from the transport failed
    ReadError,
    /// Nothing was received within the idle deadline
    IdleTimeout,
    /// An inbound frame exceeded the size limit
    MessageTooLarge,
    /// The hub closed the outbound queue (unregistered or evicted)
    QueueClosed,
    /// A write failed or missed its deadline
    WriteError,
    /// The hub was not running when the session tried to register
    HubUnavailable,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClientClosed => "client closed",
            Self::ReadError => "read error",
            Self::IdleTimeout => "idle timeout",
            Self::MessageTooLarge => "message too large",
            Self::QueueClosed => "queue closed",
            Self::WriteError => "write error",
            Self::HubUnavailable => "hub unavailable",
        };
        f.write_str(s)
    }
}
