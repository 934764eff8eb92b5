//! Notifier client tests
//!
//! The API-side client is exercised against a wiremock server standing in
//! for the hub, and once against a live gateway.

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chat_notify::notifier::{HubNotifier, NotifyError};
use chat_notify::shared::{Message, NotifierConfig};

use crate::common::{next_text, spawn_server, test_config};

fn notifier_for(url: &str) -> HubNotifier {
    let config = NotifierConfig::builder().server_url(url).build().unwrap();
    HubNotifier::new(config).unwrap()
}

#[tokio::test]
async fn test_notify_posts_new_message_request() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notify"))
        .and(body_partial_json(json!({
            "type": "new_message",
            "message": {"id": 42, "sender_id": 1, "content": "stored"},
            "recipient_ids": [2, 3],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "notification sent"})))
        .expect(1)
        .mount(&mock)
        .await;

    let notifier = notifier_for(&mock.uri());
    let message = Message::text(42, 1, "alice", "stored");

    crate::assert_ok!(notifier.notify_new_message(&message, &[2, 3]).await);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notify"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let notifier = notifier_for(&mock.uri());
    let result = notifier
        .notify_new_message(&Message::text(1, 1, "alice", "hi"), &[2])
        .await;

    assert_matches!(result, Err(NotifyError::Status(500)));
}

#[tokio::test]
async fn test_spawned_notify_reports_failure() {
    // Bind then drop a listener to get a port nothing is serving
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = notifier_for(&format!("http://{addr}"));
    let handle = notifier.spawn_notify(Message::text(1, 1, "alice", "hi"), vec![2]);

    assert_matches!(handle.await.unwrap(), Err(NotifyError::Transport(_)));
}

#[tokio::test]
async fn test_notifier_against_live_gateway() {
    let server = spawn_server(test_config()).await;
    let mut bob = server.connect(2).await;

    let notifier = notifier_for(&server.http_url(""));
    notifier
        .notify_new_message(&Message::text(5, 1, "alice", "over the wire"), &[2])
        .await
        .unwrap();

    let frame = next_text(&mut bob).await.expect("no notification received");
    let envelope = crate::assert_envelope_type!(frame, "new_message");
    assert_eq!(envelope["data"]["content"], "over the wire");
}
