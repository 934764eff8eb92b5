//! Notifier configuration module
//!
//! Configuration for the API-side client that reaches the hub, plus the
//! configuration error type used by every loader in the crate.

use thiserror::Error;

/// Environment variable holding the hub's base URL
pub const WEBSOCKET_SERVER_URL: &str = "WEBSOCKET_SERVER_URL";

/// Base URL used when `WEBSOCKET_SERVER_URL` is not set
pub const DEFAULT_SERVER_URL: &str = "http://websocket-server:8081";

/// Notifier configuration
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Base URL of the hub, without a trailing slash
    pub server_url: String,
    /// Per-request timeout
    pub timeout: std::time::Duration,
}

impl NotifierConfig {
    /// Create a new NotifierConfigBuilder
    pub fn builder() -> NotifierConfigBuilder {
        NotifierConfigBuilder::default()
    }

    /// Load from `WEBSOCKET_SERVER_URL`, falling back to the default hub address
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(WEBSOCKET_SERVER_URL) {
            builder = builder.server_url(url);
        }
        builder.build()
    }

    /// Full URL of the notify endpoint
    pub fn notify_url(&self) -> String {
        format!("{}/notify", self.server_url)
    }
}

/// Builder for NotifierConfig
#[derive(Debug, Default)]
pub struct NotifierConfigBuilder {
    server_url: Option<String>,
    timeout: Option<std::time::Duration>,
}

impl NotifierConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NotifierConfig, ConfigError> {
        let server_url = self
            .server_url
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url = server_url.trim().trim_end_matches('/').to_string();

        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(server_url));
        }

        Ok(NotifierConfig {
            server_url,
            timeout: self.timeout.unwrap_or(std::time::Duration::from_secs(5)),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
