/**
 * Application State Management
 *
 * `AppState` is what every gateway handler receives. It holds a handle to
 * the hub coordinator, the token validator and the per-session limits.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they use:
 *
 * ```rust
 * use axum::extract::State;
 * use chat_notify::backend::hub::HubHandle;
 *
 * async fn handler(State(hub): State<HubHandle>) {
 *     let _ = hub.stats().await;
 * }
 * ```
 */
use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::TokenValidator;
use crate::backend::hub::HubHandle;
use crate::backend::session::SessionConfig;

#[derive(Clone)]
pub struct AppState {
    /// Submission side of the hub coordinator
    pub hub: HubHandle,

    /// Verifies upgrade credentials
    pub tokens: Arc<TokenValidator>,

    /// Limits applied to every accepted connection
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(hub: HubHandle, tokens: TokenValidator, session: SessionConfig) -> Self {
        Self {
            hub,
            tokens: Arc::new(tokens),
            session,
        }
    }
}

impl FromRef<AppState> for HubHandle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

impl FromRef<AppState> for Arc<TokenValidator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for SessionConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session
    }
}
