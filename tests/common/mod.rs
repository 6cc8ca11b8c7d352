//! Shared utilities for lifecycle integration tests.

use std::time::Duration;

use axum::{routing::get, Router};

use api_server::config::ServerConfig;

/// Config bound to localhost on a fixed test port.
pub fn test_config(port: u16) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = format!("127.0.0.1:{}", port);
    config
}

/// Router with a trivial handler and a slow handler sleeping `delay`.
pub fn test_router(delay: Duration) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/slow",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "done"
            }),
        )
}

/// Poll until the server answers on `/health` or give up.
pub async fn wait_until_serving(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);

    for _ in 0..100 {
        if client.get(&url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server never became reachable on port {}", port);
}
