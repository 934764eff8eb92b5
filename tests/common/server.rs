//! Live server helpers
//!
//! WebSocket flows need a real listener, so these helpers bind the gateway
//! to an ephemeral port on localhost and connect with tokio-tungstenite.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

use chat_notify::backend::hub::{HubHandle, HubStats};
use chat_notify::backend::routes::create_router;
use chat_notify::backend::server::{create_state, ServerConfig};
use chat_notify::shared::UserId;

use super::auth_helpers::{generate_test_token, TEST_SECRET};

pub type TestSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a test waits for a frame or a registry change
pub const WAIT: Duration = Duration::from_secs(5);

pub struct LiveServer {
    pub addr: SocketAddr,
    pub hub: HubHandle,
}

impl LiveServer {
    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://{}/ws?token={}", self.addr, token)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Open an authenticated connection for `user_id` and wait until the hub has registered it
    pub async fn connect(&self, user_id: UserId) -> TestSocket {
        let before = self.hub.stats().await.expect("hub stopped").sessions;
        let token = generate_test_token(user_id, &format!("user{user_id}"));
        let (socket, _response) = tokio_tungstenite::connect_async(self.ws_url(&token))
            .await
            .expect("WebSocket handshake failed");
        self.wait_for_sessions(before + 1).await;
        socket
    }

    /// Poll hub stats until the session count equals `expected`
    pub async fn wait_for_sessions(&self, expected: usize) -> HubStats {
        let poll = async {
            loop {
                let stats = self.hub.stats().await.expect("hub stopped");
                if stats.sessions == expected {
                    return stats;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        tokio::time::timeout(WAIT, poll)
            .await
            .unwrap_or_else(|_| panic!("hub never reached {expected} sessions"))
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig::new(TEST_SECRET)
}

/// Serve the gateway on an ephemeral localhost port
pub async fn spawn_server(config: ServerConfig) -> LiveServer {
    let state = create_state(&config);
    let hub = state.hub.clone();
    let app = create_router(state, &config.cors_allowed_origins);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LiveServer { addr, hub }
}

/// Next text frame, skipping transport pings and pongs
pub async fn next_text(socket: &mut TestSocket) -> Option<String> {
    let read = async {
        while let Some(frame) = socket.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(text.as_str().to_string()),
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(_) | Err(_) => return None,
            }
        }
        None
    };
    tokio::time::timeout(WAIT, read).await.ok().flatten()
}

/// Assert that no text frame arrives within `within`
pub async fn assert_silent(socket: &mut TestSocket, within: Duration) {
    let read = async {
        while let Some(frame) = socket.next().await {
            if let Ok(Message::Text(text)) = frame {
                return Some(text.as_str().to_string());
            }
        }
        None
    };
    if let Ok(Some(text)) = tokio::time::timeout(within, read).await {
        panic!("Expected no frame, got: {}", text);
    }
}
