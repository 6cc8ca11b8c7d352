//! Lifecycle controller.
//!
//! # Responsibilities
//! - Drive a server run through its state machine
//! - Observe the external stop signal from a background watcher task
//! - Classify how serving ended (requested stop vs. failure)
//! - Emit lifecycle events to the log

use std::sync::Arc;

use axum::Router;
use tokio::sync::watch;

use crate::config::ServerConfig;
use crate::http::{HttpServer, ServeError};
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::net::Listener;

/// States a lifecycle run moves through.
///
/// Transitions are strictly ordered and `Stopped` is terminal. A bind
/// failure goes straight from `Starting` to `Stopped` without ever
/// publishing `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, run not yet invoked.
    Idle,
    /// Run invoked, listener not yet bound.
    Starting,
    /// Serving connections.
    Running,
    /// Stop observed, draining connections.
    Stopping,
    /// Terminal.
    Stopped,
}

/// Coordinates one server run against an external stop signal.
pub struct Controller {
    state_tx: Arc<watch::Sender<LifecycleState>>,
    state_rx: watch::Receiver<LifecycleState>,
}

impl Controller {
    /// Create a new controller in the `Idle` state.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(LifecycleState::Idle);
        Self {
            state_tx: Arc::new(tx),
            state_rx: rx,
        }
    }

    /// Watch lifecycle state transitions.
    pub fn state(&self) -> watch::Receiver<LifecycleState> {
        self.state_rx.clone()
    }

    /// Run the server until the stop signal fires or serving fails.
    ///
    /// Exactly one background task waits on `signal`; when it fires, the
    /// task requests shutdown with whatever drain budget the stop
    /// request still carries (an already-spent budget forces an
    /// immediate close). The task is always joined before an outcome is
    /// reported. A stop that fired before `run` is observed on entry and
    /// produces a prompt clean stop.
    ///
    /// Returns `Ok(())` only for a requested stop; any other termination
    /// is logged at error severity and propagated.
    pub async fn run(
        self,
        server: HttpServer,
        mut signal: ShutdownSignal,
    ) -> Result<(), ServeError> {
        let bind_address = server.config().listener.bind_address.clone();

        self.transition(LifecycleState::Starting);
        tracing::info!(address = %bind_address, "service starting");

        let listener = match Listener::bind(&server.config().listener).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(address = %bind_address, error = %e, "service failed to start");
                self.transition(LifecycleState::Stopped);
                return Err(e.into());
            }
        };

        self.transition(LifecycleState::Running);

        let stopper = server.stopper();
        let state_tx = Arc::clone(&self.state_tx);
        let stopping_address = bind_address.clone();
        let watcher = tokio::spawn(async move {
            let request = signal.requested().await;
            let _ = state_tx.send(LifecycleState::Stopping);
            tracing::info!(address = %stopping_address, "shutting down HTTP server");
            stopper.shutdown(request.remaining());
        });

        let served = server.serve(listener).await;

        // Join point: if serving failed on its own the watcher is still
        // parked on the signal, so abort before joining.
        watcher.abort();
        let _ = watcher.await;

        match &served {
            Ok(()) => tracing::info!(address = %bind_address, "service stopped"),
            Err(e) => tracing::error!(address = %bind_address, error = %e, "service stopped with error"),
        }
        self.transition(LifecycleState::Stopped);

        served
    }

    fn transition(&self, state: LifecycleState) {
        let _ = self.state_tx.send(state);
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a server built from `config` and `router` until `signal` fires.
///
/// Single-call form of the lifecycle contract: returns `Ok(())` on a
/// requested shutdown and the underlying error otherwise.
pub async fn run(
    config: ServerConfig,
    router: Router,
    signal: ShutdownSignal,
) -> Result<(), ServeError> {
    Controller::new()
        .run(HttpServer::new(config, router), signal)
        .await
}
