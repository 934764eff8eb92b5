/**
 * Hub Coordinator
 *
 * One task owns the `Registry` and applies commands to it strictly in the
 * order they arrive. Sessions and gateway handlers never touch the registry
 * directly; they hold a `HubHandle` and send `HubCommand`s.
 *
 * The command channel is unbounded. Submitting a command never blocks the
 * caller.
 */
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::backend::hub::policy::HubConfig;
use crate::backend::hub::registry::{HubStats, Registry};
use crate::backend::session::{Payload, SessionHandle, SessionId};
use crate::shared::UserId;

/// Commands accepted by the coordinator
#[derive(Debug)]
pub enum HubCommand {
    Register(SessionHandle),
    Unregister(SessionId),
    BroadcastAll(Payload),
    NotifyTargeted {
        payload: Payload,
        recipient_ids: Vec<UserId>,
        sender_id: UserId,
    },
    Stats(oneshot::Sender<HubStats>),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    #[error("hub coordinator is not running")]
    Stopped,
}

/// The coordinator task's state
pub struct Hub {
    registry: Registry,
    commands: mpsc::UnboundedReceiver<HubCommand>,
}

impl Hub {
    pub fn new(config: HubConfig) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            registry: Registry::new(config),
            commands: rx,
        };
        (hub, HubHandle { commands: tx })
    }

    /// Start the coordinator on the current runtime
    pub fn spawn(config: HubConfig) -> (HubHandle, JoinHandle<()>) {
        let (hub, handle) = Self::new(config);
        let task = tokio::spawn(hub.run());
        (handle, task)
    }

    /// Apply commands until every `HubHandle` has been dropped
    pub async fn run(mut self) {
        tracing::info!(config = ?self.registry.config(), "Hub coordinator started");

        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }

        tracing::info!(
            remaining_sessions = self.registry.len(),
            "Hub coordinator stopped"
        );
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(session) => {
                self.registry.register(session);
            }
            HubCommand::Unregister(id) => {
                self.registry.unregister(id);
            }
            HubCommand::BroadcastAll(payload) => {
                let report = self.registry.broadcast_all(&payload);
                tracing::debug!(?report, "Broadcast dispatched");
            }
            HubCommand::NotifyTargeted {
                payload,
                recipient_ids,
                sender_id,
            } => {
                let report = self.registry.notify_targeted(&payload, &recipient_ids, sender_id);
                tracing::debug!(sender_id, ?report, "Targeted notification dispatched");
            }
            HubCommand::Stats(reply) => {
                let _ = reply.send(self.registry.stats());
            }
        }
    }
}

/// Cloneable submission side of the coordinator
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    fn submit(&self, command: HubCommand) -> Result<(), HubError> {
        self.commands.send(command).map_err(|_| HubError::Stopped)
    }

    pub fn register(&self, session: SessionHandle) -> Result<(), HubError> {
        self.submit(HubCommand::Register(session))
    }

    pub fn unregister(&self, id: SessionId) -> Result<(), HubError> {
        self.submit(HubCommand::Unregister(id))
    }

    pub fn broadcast_all(&self, payload: Payload) -> Result<(), HubError> {
        self.submit(HubCommand::BroadcastAll(payload))
    }

    pub fn notify_targeted(
        &self,
        payload: Payload,
        recipient_ids: Vec<UserId>,
        sender_id: UserId,
    ) -> Result<(), HubError> {
        self.submit(HubCommand::NotifyTargeted {
            payload,
            recipient_ids,
            sender_id,
        })
    }

    /// Current registry size, observed after every previously submitted command
    pub async fn stats(&self) -> Result<HubStats, HubError> {
        let (tx, rx) = oneshot::channel();
        self.submit(HubCommand::Stats(tx))?;
        rx.await.map_err(|_| HubError::Stopped)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}
