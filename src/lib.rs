//! chat-notify - Real-time Delivery Hub
//!
//! chat-notify is the real-time half of a chat backend. The request/response
//! API persists messages; this crate keeps the live WebSocket connections and
//! fans notification events out to them.
//!
//! # Overview
//!
//! This library provides:
//! - A single serialized hub coordinator that owns the connection registry
//! - Per-connection sessions with read/write pumps over a bounded outbound queue
//! - An axum gateway: WebSocket upgrade, cross-process notify, health
//! - A notifier client the API side uses to reach the gateway
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by the hub and its producers
//!   - Chat message model, outbound/inbound envelopes, notify request
//!   - Shared error and configuration types
//!
//! - **`notifier`** - HTTP client that posts events to the hub's notify endpoint
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Token validation, hub coordinator, sessions, gateway routes
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend server modules
//!
//! # Usage
//!
//! ```rust,no_run
//! use chat_notify::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config);
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The hub registry is mutated by exactly one task. Everything else talks to
//! it through a cloneable `HubHandle`, so no locks guard connection state.

/// Shared types and data structures
pub mod shared;

/// Client for the hub's cross-process notify endpoint
pub mod notifier;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
