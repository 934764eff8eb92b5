//! Server Module
//!
//! Configuration loading, application state and app assembly for the
//! notification gateway.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration
//! └── init.rs         - Hub startup and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_notify::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::new("dev-secret");
//! let app = create_app(&config);
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{create_app, create_state};
pub use state::AppState;
