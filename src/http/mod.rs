//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! Bound listener (net)
//!     → server.rs (timeout layers, serve loop, stop handle)
//!     → externally constructed Router (handlers.rs for the binary)
//! ```
//!
//! # Design Decisions
//! - The router is an input; request semantics live with the caller
//! - Read/write deadlines apply to every connection via middleware
//! - Stopping is exposed only through the cloneable stop handle

pub mod handlers;
pub mod server;

pub use server::{HttpServer, ServeError, ServerStopper};
