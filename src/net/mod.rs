//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse address, bind socket)
//!     → Hand off to the HTTP layer, which owns the accept loop
//! ```
//!
//! # Design Decisions
//! - Binding happens once, before the run is considered live
//! - A bind failure is fatal and never retried

pub mod listener;

pub use listener::{BindError, Listener};
