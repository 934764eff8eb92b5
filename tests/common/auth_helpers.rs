//! Authentication test helpers
//!
//! Tokens are minted with the same validator type the gateway uses, under a
//! fixed test secret.

use chat_notify::backend::auth::{Claims, TokenValidator};
use chat_notify::shared::UserId;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn validator() -> TokenValidator {
    TokenValidator::new(TEST_SECRET)
}

/// Generate a valid test JWT for `user_id`
pub fn generate_test_token(user_id: UserId, username: &str) -> String {
    validator()
        .issue_default(user_id, username)
        .expect("Failed to generate test token")
}

/// Generate a token that expired an hour ago
pub fn generate_expired_token(user_id: UserId, username: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    validator()
        .sign(&Claims {
            user_id,
            username: username.to_string(),
            exp: now - 3600,
            iat: now - 7200,
        })
        .expect("Failed to sign expired token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
