//! Common test utilities and helpers
//!
//! - Token minting under a fixed test secret
//! - A live gateway on an ephemeral port, plus WebSocket client helpers
//! - Assertion macros for gateway frames

pub mod auth_helpers;
pub mod server;

pub use auth_helpers::*;
pub use server::*;
