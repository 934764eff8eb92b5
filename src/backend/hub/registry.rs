/**
 * Connection Registry
 *
 * The registry is the hub's state: the set of live sessions and the
 * user id → session index used for targeted delivery. It is a plain struct
 * with `&mut self` operations; the coordinator task is its only owner, which
 * is what makes it safe without locks.
 *
 * # Invariants
 *
 * - every index entry points at a member session
 * - a session id appears at most once in the membership map
 * - at most one session is indexed per user id
 *
 * # Closing queues
 *
 * Removing a `SessionHandle` from the membership map drops the queue's only
 * strong sender. That is the "queue closed" signal the write pump reacts to.
 */
use std::collections::{BTreeSet, HashMap};

use crate::backend::hub::policy::{HubConfig, OverflowPolicy, SupersedePolicy};
use crate::backend::session::{EnqueueError, Payload, SessionHandle, SessionId};
use crate::shared::UserId;

/// Per-dispatch accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Payload enqueued
    pub delivered: usize,
    /// Queue full, payload dropped, session kept
    pub dropped: usize,
    /// Session removed (queue full under `Evict`, or queue already closed)
    pub evicted: usize,
    /// Target user ids with no indexed session
    pub unresolved: usize,
}

/// Snapshot of registry size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct HubStats {
    pub sessions: usize,
    pub indexed_users: usize,
}

/// Result of a `register` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// No other session was indexed for this user
    Registered,
    /// Another session was indexed for this user and has been replaced
    Superseded { previous: SessionId, closed: bool },
}

#[derive(Debug)]
pub struct Registry {
    sessions: HashMap<SessionId, SessionHandle>,
    by_user: HashMap<UserId, SessionId>,
    config: HubConfig,
}

impl Registry {
    pub fn new(config: HubConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            by_user: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Session currently indexed for `user_id`
    pub fn indexed(&self, user_id: UserId) -> Option<SessionId> {
        self.by_user.get(&user_id).copied()
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            sessions: self.sessions.len(),
            indexed_users: self.by_user.len(),
        }
    }

    /// Insert a session into the membership set and the user index
    pub fn register(&mut self, session: SessionHandle) -> Registration {
        let id = session.id();
        let user_id = session.user_id();

        tracing::info!(
            session_id = %id,
            user_id,
            username = session.username(),
            "User connected"
        );

        self.sessions.insert(id, session);
        let previous = self.by_user.insert(user_id, id).filter(|prev| *prev != id);

        match previous {
            None => Registration::Registered,
            Some(previous) => {
                let closed = self.config.supersede == SupersedePolicy::Close
                    && self.evict(previous).is_some();
                tracing::warn!(
                    user_id,
                    previous_session = %previous,
                    closed,
                    "User registered a second session; index entry replaced"
                );
                Registration::Superseded { previous, closed }
            }
        }
    }

    /// Remove a session and close its queue; `false` if it was already gone
    pub fn unregister(&mut self, id: SessionId) -> bool {
        match self.evict(id) {
            Some(session) => {
                tracing::info!(
                    session_id = %id,
                    user_id = session.user_id(),
                    username = session.username(),
                    "User disconnected"
                );
                true
            }
            None => false,
        }
    }

    /// Offer `payload` to every member session
    pub fn broadcast_all(&mut self, payload: &Payload) -> DispatchReport {
        let targets: Vec<SessionId> = self.sessions.keys().copied().collect();
        let policy = self.config.broadcast_overflow;
        self.dispatch(targets, payload, policy, DispatchReport::default())
    }

    /// Offer `payload` to the sessions indexed for `recipient_ids ∪ {sender_id}`
    pub fn notify_targeted(
        &mut self,
        payload: &Payload,
        recipient_ids: &[UserId],
        sender_id: UserId,
    ) -> DispatchReport {
        let users: BTreeSet<UserId> = recipient_ids
            .iter()
            .copied()
            .chain(std::iter::once(sender_id))
            .collect();

        let mut report = DispatchReport::default();
        let mut targets = Vec::with_capacity(users.len());
        for user_id in users {
            match self.by_user.get(&user_id) {
                Some(id) => targets.push(*id),
                None => report.unresolved += 1,
            }
        }

        let policy = self.config.targeted_overflow;
        self.dispatch(targets, payload, policy, report)
    }

    fn dispatch(
        &mut self,
        targets: Vec<SessionId>,
        payload: &Payload,
        policy: OverflowPolicy,
        mut report: DispatchReport,
    ) -> DispatchReport {
        let mut dead = Vec::new();

        for id in targets {
            let Some(session) = self.sessions.get(&id) else {
                continue;
            };
            match session.try_enqueue(payload) {
                Ok(()) => report.delivered += 1,
                Err(EnqueueError::Full) => match policy {
                    OverflowPolicy::Drop => {
                        report.dropped += 1;
                        tracing::warn!(
                            session_id = %id,
                            user_id = session.user_id(),
                            "Outbound queue full, notification dropped"
                        );
                    }
                    OverflowPolicy::Evict => {
                        tracing::warn!(
                            session_id = %id,
                            user_id = session.user_id(),
                            "Outbound queue full, evicting session"
                        );
                        dead.push(id);
                    }
                },
                Err(EnqueueError::Closed) => dead.push(id),
            }
        }

        for id in dead {
            if self.evict(id).is_some() {
                report.evicted += 1;
            }
        }

        report
    }

    /// Remove from membership and, if still indexed for its user, from the index
    fn evict(&mut self, id: SessionId) -> Option<SessionHandle> {
        let session = self.sessions.remove(&id)?;
        if self.by_user.get(&session.user_id()) == Some(&id) {
            self.by_user.remove(&session.user_id());
        }
        Some(session)
    }
}
