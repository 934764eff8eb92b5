//! Integration tests
//!
//! - `gateway_test` - HTTP status codes and bodies through axum-test
//! - `websocket_test` - end-to-end delivery over real WebSocket connections
//! - `notifier_test` - the API-side client against a mock server and a live hub
//! - `config_test` - loading configuration from the process environment

mod gateway_test;
mod notifier_test;
