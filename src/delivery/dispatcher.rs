//! Delayed, independent delivery of fan-out batches.
//!
//! [`DeliveryDispatcher::dispatch`] spawns one task per notification. Each
//! task sleeps a random delay in `[0, max_delay)` and then broadcasts its
//! notification to whichever clients are connected at that moment.
//!
//! ## Rules
//! - **Non-blocking**: `dispatch()` returns as soon as the tasks are spawned.
//! - **No ordering**: notifications of one batch, and of different batches,
//!   may arrive in any order.
//! - **Fire-time membership**: a client gone before the delay elapses gets
//!   nothing; a client that connects during the delay may or may not get it.
//! - **Shutdown only**: pending deliveries are cancelled all at once through
//!   the dispatcher's [`CancellationToken`], never individually.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use super::client_set::ClientSet;
use crate::domain::NotificationMessage;

/// Upper bound (exclusive) of the default random delivery delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(120);

#[derive(Debug, Default)]
struct Counters {
    scheduled: AtomicU64,
    fired: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    cancelled: AtomicU64,
}

/// Point-in-time delivery counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStats {
    /// Notifications handed to the dispatcher.
    pub scheduled: u64,
    /// Notifications whose delay elapsed.
    pub fired: u64,
    /// Per-client deliveries (one notification to three clients counts 3).
    pub delivered: u64,
    /// Fired notifications that found no connected client.
    pub dropped: u64,
    /// Notifications abandoned at shutdown.
    pub cancelled: u64,
}

impl DeliveryStats {
    /// Notifications still waiting for their delay.
    #[must_use]
    pub const fn in_flight(&self) -> u64 {
        self.scheduled
            .saturating_sub(self.fired)
            .saturating_sub(self.cancelled)
    }
}

/// Schedules notification batches onto a [`ClientSet`].
#[derive(Debug, Clone)]
pub struct DeliveryDispatcher {
    clients: ClientSet,
    max_delay: Duration,
    shutdown: CancellationToken,
    counters: Arc<Counters>,
}

impl DeliveryDispatcher {
    /// Creates a dispatcher with its own shutdown token.
    #[must_use]
    pub fn new(clients: ClientSet, max_delay: Duration) -> Self {
        Self::with_shutdown(clients, max_delay, CancellationToken::new())
    }

    /// Creates a dispatcher whose pending deliveries stop when `shutdown`
    /// is cancelled.
    #[must_use]
    pub fn with_shutdown(
        clients: ClientSet,
        max_delay: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            clients,
            max_delay,
            shutdown,
            counters: Arc::new(Counters::default()),
        }
    }

    /// The client set deliveries go to.
    #[must_use]
    pub const fn clients(&self) -> &ClientSet {
        &self.clients
    }

    /// Schedules every notification in `batch` for independent delivery.
    ///
    /// Must be called from within a Tokio runtime. Returns the number of
    /// notifications scheduled; after shutdown nothing is scheduled.
    pub fn dispatch(&self, batch: Vec<NotificationMessage>) -> usize {
        if self.shutdown.is_cancelled() {
            tracing::debug!(dropped = batch.len(), "dispatcher shut down; batch dropped");
            return 0;
        }

        let count = batch.len();
        for notification in batch {
            let delay = self.sample_delay();
            let notification = Arc::new(notification);
            let clients = self.clients.clone();
            let shutdown = self.shutdown.clone();
            let counters = Arc::clone(&self.counters);
            counters.scheduled.fetch_add(1, Ordering::Relaxed);

            tokio::spawn(async move {
                tokio::select! {
                    biased;
                    () = shutdown.cancelled() => {
                        counters.cancelled.fetch_add(1, Ordering::Relaxed);
                    }
                    () = tokio::time::sleep(delay) => {
                        counters.fired.fetch_add(1, Ordering::Relaxed);
                        let notification_id = notification.id;
                        let reached = clients.broadcast(notification);
                        if reached == 0 {
                            counters.dropped.fetch_add(1, Ordering::Relaxed);
                            tracing::trace!(%notification_id, "no streaming clients; notification dropped");
                        } else {
                            let reached = u64::try_from(reached).unwrap_or(u64::MAX);
                            let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                            counters.delivered.fetch_add(reached, Ordering::Relaxed);
                            tracing::trace!(%notification_id, reached, delay_ms, "notification delivered");
                        }
                    }
                }
            });
        }
        count
    }

    /// Cancels every pending delivery and refuses new batches.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Current delivery counters.
    #[must_use]
    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            scheduled: self.counters.scheduled.load(Ordering::Relaxed),
            fired: self.counters.fired.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            cancelled: self.counters.cancelled.load(Ordering::Relaxed),
        }
    }

    fn sample_delay(&self) -> Duration {
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..max_ms))
    }
}
