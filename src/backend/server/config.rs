/**
 * Server Configuration
 *
 * This module loads the gateway's configuration from environment variables.
 * Everything except the token secret has a default suited to local
 * development.
 *
 * # Configuration Sources
 *
 * | Variable                 | Default                                        |
 * |--------------------------|------------------------------------------------|
 * | `JWT_SECRET`             | required                                       |
 * | `PORT`                   | `8081`                                         |
 * | `CORS_ALLOWED_ORIGINS`   | `http://localhost:3000,http://localhost:8080`  |
 * | `HUB_QUEUE_CAPACITY`     | `256`                                          |
 * | `WS_MAX_MESSAGE_SIZE`    | `512`                                          |
 * | `WS_PONG_WAIT_SECS`      | `60`                                           |
 * | `WS_WRITE_WAIT_SECS`     | `10`                                           |
 * | `WS_PING_PERIOD_SECS`    | 9/10 of the pong wait                          |
 * | `HUB_BROADCAST_OVERFLOW` | `evict`                                        |
 * | `HUB_TARGETED_OVERFLOW`  | `drop`                                         |
 * | `HUB_CLOSE_SUPERSEDED`   | `false`                                        |
 *
 * # Error Handling
 *
 * Unlike optional services, a missing secret is fatal: the binary logs the
 * error and exits non-zero rather than start with a guessable key.
 */
use std::str::FromStr;
use std::time::Duration;

use crate::backend::hub::{HubConfig, OverflowPolicy, SupersedePolicy};
use crate::backend::session::SessionConfig;
use crate::shared::ConfigError;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub cors_allowed_origins: Vec<String>,
    pub hub: HubConfig,
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: jwt_secret.into(),
            cors_allowed_origins: split_origins(DEFAULT_CORS_ALLOWED_ORIGINS),
            hub: HubConfig::default(),
            session: SessionConfig::default(),
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingValue("JWT_SECRET")` - secret unset or empty
    /// * `ConfigError::InvalidValue` - a variable is set but does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        let mut config = Self::new(jwt_secret);

        if let Some(port) = get("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = split_origins(&origins);
        }

        let mut session = SessionConfig::default();
        if let Some(capacity) = get("HUB_QUEUE_CAPACITY") {
            let capacity: usize = parse("HUB_QUEUE_CAPACITY", &capacity)?;
            if capacity == 0 {
                return Err(invalid("HUB_QUEUE_CAPACITY", "0"));
            }
            session = session.with_queue_capacity(capacity);
        }
        if let Some(size) = get("WS_MAX_MESSAGE_SIZE") {
            session = session.with_max_message_size(parse("WS_MAX_MESSAGE_SIZE", &size)?);
        }
        if let Some(secs) = get("WS_PONG_WAIT_SECS") {
            session = session.with_pong_wait(seconds("WS_PONG_WAIT_SECS", &secs)?);
        }
        if let Some(secs) = get("WS_WRITE_WAIT_SECS") {
            session = session.with_write_wait(seconds("WS_WRITE_WAIT_SECS", &secs)?);
        }
        if let Some(secs) = get("WS_PING_PERIOD_SECS") {
            let period = seconds("WS_PING_PERIOD_SECS", &secs)?;
            if period >= session.pong_wait {
                return Err(invalid("WS_PING_PERIOD_SECS", &secs));
            }
            session = session.with_ping_period(period);
        }
        config.session = session;

        let mut hub = HubConfig::default();
        if let Some(policy) = get("HUB_BROADCAST_OVERFLOW") {
            hub = hub.with_broadcast_overflow(policy_value("HUB_BROADCAST_OVERFLOW", &policy)?);
        }
        if let Some(policy) = get("HUB_TARGETED_OVERFLOW") {
            hub = hub.with_targeted_overflow(policy_value("HUB_TARGETED_OVERFLOW", &policy)?);
        }
        if let Some(close) = get("HUB_CLOSE_SUPERSEDED") {
            if parse::<bool>("HUB_CLOSE_SUPERSEDED", &close.to_ascii_lowercase())? {
                hub = hub.with_supersede(SupersedePolicy::Close);
            }
        }
        config.hub = hub;

        Ok(config)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn seconds(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match parse::<u64>(key, value)? {
        0 => Err(invalid(key, value)),
        secs => Ok(Duration::from_secs(secs)),
    }
}

fn policy_value(key: &'static str, value: &str) -> Result<OverflowPolicy, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}
