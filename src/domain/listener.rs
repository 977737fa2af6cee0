//! The per-subscriber reaction invoked by the fan-out bus.

use std::fmt;

use super::{DomainEvent, NotificationMessage, SubscriberId};

/// Failure of a single listener during fan-out.
///
/// Never aborts a publish: the bus logs it and leaves the notification
/// out of the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    /// The listener could not render a notification.
    #[error("render failed for subscriber {subscriber_id}: {reason}")]
    Render {
        /// Subscriber whose notification failed.
        subscriber_id: SubscriberId,
        /// Human-readable cause.
        reason: String,
    },

    /// The listener panicked while handling the event.
    #[error("listener for subscriber {subscriber_id} panicked: {reason}")]
    Panicked {
        /// Subscriber whose listener panicked.
        subscriber_id: SubscriberId,
        /// Panic payload, if it was a string.
        reason: String,
    },
}

/// Reaction bound to one subscriber: turns an event into a notification.
///
/// Implementations must be cheap and synchronous; publish calls every
/// listener inline before returning.
pub trait Listener: Send + Sync + fmt::Debug {
    /// Builds the notification for this listener's subscriber.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] when no notification can be produced.
    fn on_event(&self, event: &DomainEvent) -> Result<NotificationMessage, ListenerError>;
}
