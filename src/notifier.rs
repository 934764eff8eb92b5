/**
 * Hub Notifier
 *
 * The API side calls this after it has stored a message. It posts a
 * `new_message` notification to the hub's `/notify` endpoint.
 *
 * # Delivery
 *
 * Delivery to the hub is best-effort: there is no retry and no redelivery.
 * Failures are never silent though. `notify_new_message` returns them to the
 * caller, and `spawn_notify` logs them from the background task it starts
 * and hands back the `JoinHandle` so callers can still observe completion.
 */
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::shared::config::{ConfigError, NotifierConfig};
use crate::shared::message::{Message, UserId};
use crate::shared::notification::NotifyRequest;

/// Errors from a single notify attempt
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid notifier configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to reach hub: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("hub returned status {0}")]
    Status(u16),
}

/// HTTP client for the hub's notify endpoint
#[derive(Debug, Clone)]
pub struct HubNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl HubNotifier {
    pub fn new(config: NotifierConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Build a notifier from `WEBSOCKET_SERVER_URL`
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::new(NotifierConfig::from_env()?)
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Notify the hub that `message` was stored for `recipient_ids`
    pub async fn notify_new_message(
        &self,
        message: &Message,
        recipient_ids: &[UserId],
    ) -> Result<(), NotifyError> {
        let request = NotifyRequest::new_message(message.clone(), recipient_ids.to_vec());
        self.send(&request).await
    }

    /// Post an arbitrary notify request
    pub async fn send(&self, request: &NotifyRequest) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.config.notify_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        tracing::debug!(
            message_id = request.message.as_ref().map(|m| m.id),
            recipients = request.recipient_ids.len(),
            "Hub accepted notification"
        );
        Ok(())
    }

    /// Notify in the background, logging any failure
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_notify(
        &self,
        message: Message,
        recipient_ids: Vec<UserId>,
    ) -> JoinHandle<Result<(), NotifyError>> {
        let notifier = self.clone();
        tokio::spawn(async move {
            let result = notifier.notify_new_message(&message, &recipient_ids).await;
            if let Err(e) = &result {
                tracing::warn!(
                    message_id = message.id,
                    sender_id = message.sender_id,
                    error = %e,
                    "Failed to notify hub of new message"
                );
            }
            result
        })
    }
}
