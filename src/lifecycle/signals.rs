//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Translate signals into a stop request on the shutdown coordinator
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The stop request carries the configured drain grace

use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, StopRequest};

/// Spawn the signal listener task.
///
/// The task waits for SIGINT or SIGTERM, then requests a stop whose
/// drain is bounded by `grace`. The coordinator keeps the signal
/// observable for any later subscriber, so it does not matter whether
/// the run is already serving when a signal arrives.
pub fn spawn(shutdown: Shutdown, grace: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown.trigger_with(StopRequest::within(grace));
    })
}

async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
