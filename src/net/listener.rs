//! TCP listener binding.
//!
//! # Responsibilities
//! - Parse and bind the configured address
//! - Classify bind failures for the startup path
//! - Hand the bound socket to the serving layer

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Failure to bind the configured address.
///
/// Bind failures are environmental (address in use, permission denied,
/// malformed address) and are surfaced immediately without retry.
#[derive(Debug, Error)]
#[error("failed to bind {addr}: {source}")]
pub struct BindError {
    /// The address that could not be bound.
    pub addr: String,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

impl BindError {
    fn new(config: &ListenerConfig, source: std::io::Error) -> Self {
        Self {
            addr: config.bind_address.clone(),
            source,
        }
    }
}

/// A bound TCP listener, not yet accepting connections.
///
/// Binding is separated from serving so that startup failures are
/// classified before a run is considered live.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, BindError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            BindError::new(
                config,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
            )
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| BindError::new(config, e))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| BindError::new(config, e))?;

        tracing::info!(address = %local_addr, "Listener bound");

        Ok(Self { inner: listener })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Convert into a std listener for the serving layer.
    pub fn into_std(self) -> Result<std::net::TcpListener, std::io::Error> {
        self.inner.into_std()
    }
}
