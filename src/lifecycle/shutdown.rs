//! Shutdown coordination for the server.
//!
//! The stop signal is single-shot and level-triggered: once fired it
//! stays fired, so a subscriber that looks late still observes it.

use std::time::{Duration, Instant};

use tokio::sync::watch;

/// A request to stop serving, carrying the remaining drain budget.
///
/// The deadline bounds how long shutdown may drain in-flight
/// connections. A request without a deadline drains without bound; a
/// request whose deadline has already passed means an immediate forced
/// close.
#[derive(Debug, Clone, Copy)]
pub struct StopRequest {
    deadline: Option<Instant>,
}

impl StopRequest {
    /// Stop request without a drain deadline.
    pub fn unbounded() -> Self {
        Self { deadline: None }
    }

    /// Stop request whose drain must finish by `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Stop request allowing `grace` of drain time from now.
    ///
    /// A grace too large to represent is treated as unbounded.
    pub fn within(grace: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(grace),
        }
    }

    /// Remaining drain budget.
    ///
    /// `None` means unbounded; zero means the budget is already spent
    /// and the close must be immediate.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether the drain budget is already spent.
    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(d) if d.is_zero())
    }
}

/// Coordinator for graceful shutdown.
///
/// Owns the stop signal observed by a lifecycle run. Externally owned:
/// the lifecycle only subscribes, it never triggers.
pub struct Shutdown {
    tx: watch::Sender<Option<StopRequest>>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Subscribe to the stop signal.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request a stop with an unbounded drain.
    pub fn trigger(&self) {
        self.trigger_with(StopRequest::unbounded());
    }

    /// Request a stop. The first request wins; later triggers are no-ops.
    pub fn trigger_with(&self, request: StopRequest) {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(request);
            true
        });
    }

    /// Whether a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Number of subscribers still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the stop signal.
pub struct ShutdownSignal {
    rx: watch::Receiver<Option<StopRequest>>,
}

impl ShutdownSignal {
    /// Wait until a stop is requested.
    ///
    /// Resolves immediately if the signal already fired. If the
    /// coordinator is dropped without firing, this resolves to an
    /// already-expired request so a run can never hang on a lost signal.
    pub async fn requested(&mut self) -> StopRequest {
        loop {
            if let Some(request) = *self.rx.borrow_and_update() {
                return request;
            }
            if self.rx.changed().await.is_err() {
                return StopRequest::with_deadline(Instant::now());
            }
        }
    }

    /// Check for a stop request without waiting.
    pub fn try_requested(&self) -> Option<StopRequest> {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signal_fires_after_trigger() {
        let shutdown = Shutdown::new();
        let mut signal = shutdown.subscribe();
        assert!(signal.try_requested().is_none());

        shutdown.trigger();
        let request = signal.requested().await;
        assert!(request.remaining().is_none());
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn late_subscriber_observes_fired_signal() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let mut signal = shutdown.subscribe();
        let request = signal.requested().await;
        assert!(request.remaining().is_none());
    }

    #[tokio::test]
    async fn first_request_wins() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger_with(StopRequest::within(Duration::from_secs(1)));

        let mut signal = shutdown.subscribe();
        assert!(signal.requested().await.remaining().is_none());
    }

    #[tokio::test]
    async fn dropped_coordinator_counts_as_expired_stop() {
        let shutdown = Shutdown::new();
        let mut signal = shutdown.subscribe();
        drop(shutdown);

        let request = signal.requested().await;
        assert!(request.is_expired());
    }

    #[test]
    fn expired_request_reports_zero_budget() {
        let request = StopRequest::within(Duration::ZERO);
        assert!(request.is_expired());
        assert_eq!(request.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn unbounded_request_never_expires() {
        let request = StopRequest::unbounded();
        assert!(request.remaining().is_none());
        assert!(!request.is_expired());
    }
}
