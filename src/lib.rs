//! HTTP service lifecycle library.
//!
//! Owns the run/stop contract of a network-facing HTTP server: bind a
//! listener, serve an externally constructed router until an external
//! stop signal fires, drain in-flight connections within a bounded
//! grace, and classify how the run ended — a requested stop is success,
//! anything else is an error surfaced to the caller.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::{HttpServer, ServeError};
pub use lifecycle::{Controller, Shutdown};
