//! Built-in handlers for the binary.
//!
//! The lifecycle takes any externally constructed router; this module is
//! the default surface the binary serves.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct ServiceStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// Default router for the binary.
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Liveness endpoint.
async fn health() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
