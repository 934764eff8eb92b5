//! Liveness and registry size endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::backend::error::BackendError;
use crate::backend::hub::{HubHandle, HubStats};

/// `GET /health`
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// `GET /stats`; `503` once the coordinator has stopped
pub async fn handle_stats(State(hub): State<HubHandle>) -> Result<Json<HubStats>, BackendError> {
    Ok(Json(hub.stats().await?))
}
