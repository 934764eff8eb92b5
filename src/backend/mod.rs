//! Backend Module
//!
//! This module contains the server side of chat-notify: the hub coordinator,
//! per-connection sessions and the HTTP/WebSocket gateway in front of them.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`auth`** - Token validation for upgrade requests
//! - **`hub`** - Connection registry and its coordinator task
//! - **`session`** - Outbound queue, read/write pumps, lifecycle
//! - **`gateway`** - Upgrade, notify, broadcast, health and stats handlers
//! - **`middleware`** - Credential extraction
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, application state, initialization
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── auth/           - Token validation
//! ├── hub/            - Registry and coordinator
//! ├── session/        - Connection sessions
//! ├── gateway/        - HTTP handlers
//! ├── middleware/     - Request extractors
//! ├── routes/         - Route configuration
//! ├── server/         - Server setup and state
//! └── error/          - Error types
//! ```
//!
//! # Data Flow
//!
//! ```text
//! API side ── POST /notify ──► gateway ──► HubHandle ──► Hub::run
//!                                                          │ try_send
//!                                                          ▼
//! client ◄── WebSocket ◄── write pump ◄── outbound queue (per session)
//! ```
//!
//! # Thread Safety
//!
//! The registry is owned by one task. Handlers and sessions hold cloned
//! `HubHandle`s and communicate by message passing only.

/// Token validation
pub mod auth;

/// Backend error types
pub mod error;

/// HTTP and WebSocket handlers
pub mod gateway;

/// Connection registry and coordinator
pub mod hub;

/// Request extractors
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Per-connection sessions
pub mod session;

pub use error::BackendError;
pub use hub::{Hub, HubHandle};
pub use server::{create_app, ServerConfig};
