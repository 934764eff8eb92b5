//! Gateway HTTP tests
//!
//! Requests go through the real router in-process. Sessions are stood in for
//! by registering `SessionHandle`s directly, so delivery can be observed on
//! the receiving end of their queues.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use chat_notify::backend::auth::Identity;
use chat_notify::backend::hub::{Hub, HubConfig, HubStats};
use chat_notify::backend::routes::create_router;
use chat_notify::backend::server::{create_state, AppState};
use chat_notify::backend::session::{Payload, SessionConfig, SessionHandle};
use chat_notify::shared::{Message, NotifyRequest, UserId};

use crate::common::{generate_expired_token, generate_test_token, test_config, validator};

fn test_server() -> (TestServer, AppState) {
    let config = test_config();
    let state = create_state(&config);
    let server = TestServer::new(create_router(state.clone(), &config.cors_allowed_origins)).unwrap();
    (server, state)
}

fn register(state: &AppState, user_id: UserId) -> mpsc::Receiver<Payload> {
    let (tx, rx) = mpsc::channel(8);
    let identity = Identity { user_id, username: format!("user{user_id}") };
    state.hub.register(SessionHandle::new(identity, tx)).unwrap();
    rx
}

async fn recv(rx: &mut mpsc::Receiver<Payload>) -> Value {
    let payload = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("no payload delivered")
        .expect("queue closed");
    serde_json::from_str(&payload).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (server, _state) = test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "OK"}));
}

#[tokio::test]
async fn test_upgrade_without_token_is_unauthorized() {
    let (server, state) = test_server();

    let response = server.get("/ws").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({"error": "token required", "status": 401}));
    assert_eq!(state.hub.stats().await.unwrap(), HubStats::default());
}

#[tokio::test]
async fn test_upgrade_with_bad_tokens_is_unauthorized() {
    let (server, _state) = test_server();
    let expired = generate_expired_token(1, "alice");
    let foreign = chat_notify::backend::auth::TokenValidator::new("some-other-secret")
        .issue_default(1, "alice")
        .unwrap();

    for (token, error) in [
        ("garbage", "malformed token"),
        (expired.as_str(), "token expired"),
        (foreign.as_str(), "invalid token signature"),
    ] {
        let response = server.get("/ws").add_query_param("token", token).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], error);
    }
}

#[tokio::test]
async fn test_upgrade_with_valid_token_but_no_handshake() {
    let (server, _state) = test_server();
    let token = generate_test_token(1, "alice");

    let response = server.get("/ws").add_query_param("token", &token).await;

    // Past authentication, refused by the upgrade extractor instead
    let status = response.status_code();
    assert!(status.is_client_error(), "unexpected status {status}");
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_notify_delivers_to_recipients_and_sender() {
    let (server, state) = test_server();
    let mut alice = register(&state, 1);
    let mut bob = register(&state, 2);
    let mut carol = register(&state, 3);

    let message = Message::text(100, 1, "alice", "hello bob");
    let response = server
        .post("/notify")
        .json(&NotifyRequest::new_message(message, vec![2]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "notification sent"}));

    for rx in [&mut alice, &mut bob] {
        let envelope = recv(rx).await;
        assert_eq!(envelope["type"], "new_message");
        assert_eq!(envelope["data"]["id"], 100);
        assert_eq!(envelope["data"]["content"], "hello bob");
    }

    // Observed after the notify was processed
    state.hub.stats().await.unwrap();
    assert!(carol.try_recv().is_err());
}

#[tokio::test]
async fn test_notify_other_type_is_acknowledged_without_dispatch() {
    let (server, state) = test_server();
    let mut bob = register(&state, 2);

    let mut request = NotifyRequest::new_message(Message::text(1, 1, "alice", "hi"), vec![2]);
    request.kind = "message_read".to_string();
    let response = server.post("/notify").json(&request).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    state.hub.stats().await.unwrap();
    assert!(bob.try_recv().is_err());
}

#[tokio::test]
async fn test_notify_null_recipients_still_reaches_sender() {
    let (server, state) = test_server();
    let mut alice = register(&state, 1);
    let mut bob = register(&state, 2);

    let body = json!({
        "type": "new_message",
        "message": Message::text(11, 1, "alice", "anyone here?"),
        "recipient_ids": null,
    });
    let response = server.post("/notify").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let envelope = recv(&mut alice).await;
    assert_eq!(envelope["type"], "new_message");
    assert_eq!(envelope["data"]["id"], 11);

    state.hub.stats().await.unwrap();
    assert!(bob.try_recv().is_err());
}

#[tokio::test]
async fn test_notify_other_type_without_message_is_acknowledged() {
    let (server, state) = test_server();
    let mut bob = register(&state, 2);

    let response = server.post("/notify").json(&json!({"type": "message_read"})).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "notification sent"}));
    state.hub.stats().await.unwrap();
    assert!(bob.try_recv().is_err());
}

#[tokio::test]
async fn test_notify_malformed_body_is_bad_request() {
    let (server, state) = test_server();
    let mut bob = register(&state, 2);

    let bodies = [
        "{not json".to_string(),
        json!({"type": "new_message", "recipient_ids": [2]}).to_string(),
        json!({"type": "new_message", "message": {}, "recipient_ids": "2"}).to_string(),
    ];
    for body in bodies {
        let response = server.post("/notify").text(body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "Invalid request", "status": 400}));
    }

    assert_eq!(state.hub.stats().await.unwrap(), HubStats { sessions: 1, indexed_users: 1 });
    assert!(bob.try_recv().is_err());
}

#[tokio::test]
async fn test_broadcast_reaches_every_session() {
    let (server, state) = test_server();
    let mut receivers: Vec<_> = (1..=3).map(|id| register(&state, id)).collect();

    let response = server
        .post("/broadcast")
        .json(&json!({"type": "maintenance", "data": {"in_minutes": 5}}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    for rx in receivers.iter_mut() {
        assert_eq!(recv(rx).await, json!({"type": "maintenance", "data": {"in_minutes": 5}}));
    }
}

#[tokio::test]
async fn test_broadcast_malformed_body_is_bad_request() {
    let (server, _state) = test_server();

    let response = server.post("/broadcast").json(&json!({"data": 1})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats() {
    let (server, state) = test_server();
    let _a = register(&state, 1);
    let _b = register(&state, 2);

    let response = server.get("/stats").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"sessions": 2, "indexed_users": 2}));
}

#[tokio::test]
async fn test_stopped_hub_is_service_unavailable() {
    let (hub, handle) = Hub::new(HubConfig::default());
    drop(hub);
    let state = AppState::new(handle, validator(), SessionConfig::default());
    let server = TestServer::new(create_router(state, &[])).unwrap();

    let response = server.get("/stats").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let response = server
        .post("/notify")
        .json(&NotifyRequest::new_message(Message::text(1, 1, "alice", "hi"), vec![2]))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["status"], 503);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let (server, _state) = test_server();

    let response = server
        .method(Method::OPTIONS, "/notify")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3000"),
        )
        .add_header(
            HeaderName::from_static("access-control-request-method"),
            HeaderValue::from_static("POST"),
        )
        .await;

    assert_eq!(
        response.headers().get("access-control-allow-origin"),
        Some(&HeaderValue::from_static("http://localhost:3000"))
    );
    assert_eq!(
        response.headers().get("access-control-allow-credentials"),
        Some(&HeaderValue::from_static("true"))
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let (server, _state) = test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://evil.example.com"),
        )
        .await;

    assert!(response.headers().get("access-control-allow-origin").is_none());
}
