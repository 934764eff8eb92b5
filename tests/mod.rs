//! Test suite for chat-notify
//!
//! This module organizes all integration and property tests

#[cfg(feature = "ssr")]
pub mod common;
#[cfg(feature = "ssr")]
pub mod integration;
pub mod property;
