/**
 * Router Configuration
 *
 * This module assembles the gateway's routes and the layers applied to all
 * of them.
 *
 * # Layers
 *
 * - `TraceLayer` - one span per HTTP request
 * - `CorsLayer` - origins from `CORS_ALLOWED_ORIGINS`, credentials allowed
 *
 * # Route Details
 *
 * - `GET /ws` - WebSocket upgrade (token required)
 * - `POST /notify` - targeted delivery from the API side
 * - `POST /broadcast` - delivery to every session
 * - `GET /health` - liveness
 * - `GET /stats` - registry size
 */
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::gateway::{
    handle_broadcast, handle_health, handle_notify, handle_stats, handle_ws_upgrade,
};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origins: &[String]) -> Router<()> {
    Router::new()
        .route("/ws", get(handle_ws_upgrade))
        .route("/notify", post(handle_notify))
        .route("/broadcast", post(handle_broadcast))
        .route("/health", get(handle_health))
        .route("/stats", get(handle_stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)),
        )
        .with_state(app_state)
}

/// CORS policy for browser clients of the gateway
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}
