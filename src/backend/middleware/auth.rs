/**
 * Upgrade Authentication
 *
 * Browsers cannot set headers on a WebSocket handshake, so the credential
 * travels in the `token` query parameter. An `Authorization: Bearer` header
 * is accepted as a fallback for non-browser clients.
 *
 * `WsIdentity` is an extractor. Listed before `WebSocketUpgrade` in a
 * handler's arguments, it refuses the request with `401` before any upgrade
 * work happens.
 */
use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::backend::auth::{Identity, TokenValidator};
use crate::backend::error::BackendError;
use crate::backend::session::SessionState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Identity of an authenticated upgrade request
#[derive(Clone, Debug)]
pub struct WsIdentity(pub Identity);

/// Pull the raw credential off a request, query parameter first
pub fn extract_token(parts: &Parts) -> Option<String> {
    let from_query = Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty());

    from_query.or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

impl<S> FromRequestParts<S> for WsIdentity
where
    Arc<TokenValidator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenValidator>::from_ref(state);
        let token = extract_token(parts);

        let identity = tokens.validate(token.as_deref()).map_err(|e| {
            tracing::warn!(state = ?SessionState::Rejected, "Rejected upgrade request: {}", e);
            e
        })?;

        Ok(WsIdentity(identity))
    }
}
