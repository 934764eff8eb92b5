//! Middleware Module
//!
//! Request processing that runs before the gateway's handlers.
//!
//! - **`auth`** - Upgrade credential extraction and validation

pub mod auth;

pub use auth::{extract_token, WsIdentity};
