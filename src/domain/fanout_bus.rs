//! Synchronous fan-out of a domain event to every registered listener.
//!
//! [`FanoutBus`] holds exactly one [`Listener`] per subscriber id, in
//! registration order. It is owned by the
//! [`SubscriberRegistry`](super::SubscriberRegistry), which keeps its
//! membership identical to the registry's. Publishing works on a cloned
//! snapshot, so a concurrent unsubscribe never disturbs an iteration.
//!
//! ## Isolation
//! - A listener returning `Err` is logged and skipped.
//! - A listener that panics is caught, logged, and skipped.
//! - No placeholder notification is ever synthesized for a failed listener.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::listener::{Listener, ListenerError};
use super::{DomainEvent, NotificationMessage, SubscriberId};

/// Result of one fan-out pass.
#[derive(Debug, Default)]
pub struct FanoutReport {
    /// Notifications in listener registration order.
    pub notifications: Vec<NotificationMessage>,
    /// Listeners that produced no notification.
    pub failures: Vec<ListenerError>,
}

/// Ordered set of listeners keyed by subscriber id.
///
/// Cloning is cheap (one `Arc` bump per listener) and yields an
/// independent snapshot.
#[derive(Debug, Clone, Default)]
pub struct FanoutBus {
    listeners: Vec<(SubscriberId, Arc<dyn Listener>)>,
}

impl FanoutBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` under `id`. Returns `false` and leaves the bus
    /// unchanged if `id` is already present.
    pub(crate) fn register(&mut self, id: SubscriberId, listener: Arc<dyn Listener>) -> bool {
        if self.contains(id) {
            return false;
        }
        self.listeners.push((id, listener));
        true
    }

    /// Removes the listener for `id`. Returns whether one was removed.
    pub(crate) fn unregister(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Returns `true` if a listener is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.listeners.iter().any(|(existing, _)| *existing == id)
    }

    /// Registered subscriber ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = SubscriberId> + '_ {
        self.listeners.iter().map(|(id, _)| *id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invokes every listener and returns the notifications that were
    /// produced, in registration order. Failures are logged and omitted.
    #[must_use]
    pub fn notify_all(&self, event: &DomainEvent) -> Vec<NotificationMessage> {
        self.fan_out(event).notifications
    }

    /// Like [`notify_all`](Self::notify_all) but also returns the failures.
    #[must_use]
    pub fn fan_out(&self, event: &DomainEvent) -> FanoutReport {
        let mut report = FanoutReport {
            notifications: Vec::with_capacity(self.listeners.len()),
            failures: Vec::new(),
        };

        for (subscriber_id, listener) in &self.listeners {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event)))
                .unwrap_or_else(|payload| {
                    Err(ListenerError::Panicked {
                        subscriber_id: *subscriber_id,
                        reason: panic_message(payload.as_ref()),
                    })
                });

            match outcome {
                Ok(notification) => report.notifications.push(notification),
                Err(err) => {
                    tracing::warn!(
                        %subscriber_id,
                        event_id = %event.id,
                        error = %err,
                        "listener failed; notification omitted"
                    );
                    report.failures.push(err);
                }
            }
        }

        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
