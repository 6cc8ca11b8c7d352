//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Run (controller.rs):
//!     Starting → bind listener → Running → serve blocks
//!
//! Stop (shutdown.rs):
//!     Shutdown::trigger → watcher task observes → Stopping →
//!     drain within budget → force-close stragglers → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → StopRequest with the configured grace
//! ```
//!
//! # Design Decisions
//! - The stop signal is level-triggered: a run started after the signal
//!   fired still stops promptly
//! - A requested stop is classified as success; everything else is an
//!   error surfaced to the caller
//! - The watcher task is always joined before an outcome is reported

pub mod controller;
pub mod shutdown;
pub mod signals;

pub use controller::{run, Controller, LifecycleState};
pub use shutdown::{Shutdown, ShutdownSignal, StopRequest};
