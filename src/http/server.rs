//! HTTP server unit.
//!
//! # Responsibilities
//! - Own the immutable server configuration and the request router
//! - Apply the read/write timeout policy to every connection
//! - Serve until stopped via the handle or failed in transport
//! - Expose a stop handle that drains in-flight work within a bound

use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use thiserror::Error;
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::net::{BindError, Listener};

/// Error returned when serving ends for any reason other than a
/// requested stop.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listener address could not be bound at startup.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The server failed while accepting or serving connections.
    #[error("http server failed: {0}")]
    Transport(#[source] std::io::Error),
}

/// HTTP server owning the socket lifecycle for a single run.
///
/// `serve` blocks until the stop handle fires or the transport fails.
/// A requested stop is reported as `Ok(())`; every other termination is
/// a [`ServeError`]. The distinction is carried in the return value, not
/// in a sentinel error compared by identity.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    handle: Handle,
}

impl HttpServer {
    /// Create a new HTTP server around an externally constructed router.
    ///
    /// The configured read and write deadlines are layered onto the
    /// router here: the read deadline bounds how long a client may take
    /// to stream the request body, the write deadline bounds producing
    /// and delivering the response.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let router = router
            .layer(TimeoutLayer::new(config.timeouts.write()))
            .layer(RequestBodyTimeoutLayer::new(config.timeouts.read()))
            .layer(TraceLayer::new_for_http());

        Self {
            config,
            router,
            handle: Handle::new(),
        }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Stop handle for this server. All clones control the same run.
    pub fn stopper(&self) -> ServerStopper {
        ServerStopper {
            handle: self.handle.clone(),
        }
    }

    /// Serve connections on the given listener until stopped or failed.
    ///
    /// Returns `Ok(())` only when the stop handle ended the run. The stop
    /// state is level-triggered: if it fired before `serve` was called,
    /// the run observes it and returns promptly instead of blocking.
    pub async fn serve(self, listener: Listener) -> Result<(), ServeError> {
        let addr = listener.local_addr().map_err(ServeError::Transport)?;
        tracing::info!(address = %addr, "HTTP server starting");

        let listener = listener.into_std().map_err(ServeError::Transport)?;

        axum_server::from_tcp(listener)
            .handle(self.handle)
            .serve(self.router.into_make_service())
            .await
            .map_err(ServeError::Transport)?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }
}

/// Cloneable stop handle for a running [`HttpServer`].
///
/// Every operation is idempotent and safe to invoke before `serve`
/// starts or concurrently from several tasks.
#[derive(Clone)]
pub struct ServerStopper {
    handle: Handle,
}

impl ServerStopper {
    /// Stop accepting new connections and drain in-flight ones.
    ///
    /// `grace` bounds the drain: `None` waits for active connections
    /// without bound, a non-zero grace force-closes whatever is still
    /// open once it elapses, and a zero grace (an already-spent budget)
    /// closes everything immediately.
    pub fn shutdown(&self, grace: Option<Duration>) {
        match grace {
            None => self.handle.graceful_shutdown(None),
            Some(d) if d.is_zero() => self.handle.shutdown(),
            Some(d) => self.handle.graceful_shutdown(Some(d)),
        }
    }

    /// Number of connections still open on this run.
    pub fn connection_count(&self) -> usize {
        self.handle.connection_count()
    }
}
