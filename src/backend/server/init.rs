/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Start the hub coordinator task
 * 2. Build the token validator from the shared secret
 * 3. Assemble `AppState`
 * 4. Create the router
 *
 * The coordinator lives as long as some `HubHandle` does. The router's state
 * holds one, so the hub stops once the server has shut down and dropped it.
 */
use axum::Router;

use crate::backend::auth::TokenValidator;
use crate::backend::hub::Hub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Build the application state for `config`, starting a hub
///
/// Must be called from within a tokio runtime.
pub fn create_state(config: &ServerConfig) -> AppState {
    let (hub, _task) = Hub::spawn(config.hub);
    let tokens = TokenValidator::new(&config.jwt_secret);

    tracing::info!(
        queue_capacity = config.session.queue_capacity,
        max_message_size = config.session.max_message_size,
        pong_wait_secs = config.session.pong_wait.as_secs(),
        "Hub initialized"
    );

    AppState::new(hub, tokens, config.session)
}

/// Create and configure the Axum application
pub fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing chat-notify gateway");

    let app_state = create_state(config);
    let app = create_router(app_state, &config.cors_allowed_origins);

    tracing::info!("Router configured");
    app
}
