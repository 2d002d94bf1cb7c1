//! Shared helpers for client integration tests: mock upstream servers
//! bound to ephemeral ports, and an in-memory token source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use citylens_client::TokenSource;

/// Serve `app` on an ephemeral local port; returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral bind should succeed");
    let addr = listener.local_addr().expect("local_addr should resolve");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server error");
    });

    format!("http://{addr}")
}

/// In-memory [`TokenSource`] with scripted refresh behaviour.
pub struct MemoryTokens {
    access: Mutex<Option<String>>,
    /// Token the next refresh installs; `None` makes refresh fail.
    refresh_to: Option<String>,
    pub refresh_calls: AtomicUsize,
}

impl MemoryTokens {
    pub fn new(access: Option<&str>, refresh_to: Option<&str>) -> Self {
        Self {
            access: Mutex::new(access.map(str::to_owned)),
            refresh_to: refresh_to.map(str::to_owned),
            refresh_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TokenSource for MemoryTokens {
    async fn access_token(&self) -> Option<String> {
        self.access.lock().unwrap().clone()
    }

    async fn refresh(&self) -> bool {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        match &self.refresh_to {
            Some(token) => {
                *self.access.lock().unwrap() = Some(token.clone());
                true
            }
            None => false,
        }
    }
}
