//! Notification service: validates requests, mutates the registry, and
//! drives fan-out and delivery.

use std::sync::Arc;

use crate::delivery::{ClientSet, DeliveryDispatcher};
use crate::domain::{Channel, DomainEvent, EventType, Subscriber, SubscriberId, SubscriberRegistry};
use crate::error::GatewayError;

/// What a publish call did.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// The event that was created.
    pub event: DomainEvent,
    /// Subscribers registered when the fan-out snapshot was taken.
    pub total_subscribers: usize,
    /// Notifications handed to the dispatcher.
    pub scheduled: usize,
    /// Listeners that failed and were left out.
    pub failed: usize,
}

/// Orchestration layer for the four core operations.
///
/// Stateless coordinator: owns references to [`SubscriberRegistry`] for
/// state and [`DeliveryDispatcher`] for delivery. Publish follows the
/// pattern: validate → create event → snapshot bus → fan out → schedule
/// delivery → return, without waiting for any delivery.
#[derive(Debug, Clone)]
pub struct NotificationService {
    registry: Arc<SubscriberRegistry>,
    dispatcher: DeliveryDispatcher,
}

impl NotificationService {
    /// Creates a new `NotificationService`.
    #[must_use]
    pub fn new(registry: Arc<SubscriberRegistry>, dispatcher: DeliveryDispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Returns a reference to the inner [`SubscriberRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Returns a reference to the inner [`DeliveryDispatcher`].
    #[must_use]
    pub fn dispatcher(&self) -> &DeliveryDispatcher {
        &self.dispatcher
    }

    /// Returns the streaming client set.
    #[must_use]
    pub fn clients(&self) -> &ClientSet {
        self.dispatcher.clients()
    }

    /// Registers a subscriber and returns it with the new total.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `name` is blank.
    pub async fn subscribe(
        &self,
        name: &str,
        channel: Channel,
    ) -> Result<(Subscriber, usize), GatewayError> {
        let name = require_text("name", name)?;
        let subscriber = self.registry.add(name, channel).await;
        let total = self.registry.count().await;

        tracing::info!(subscriber_id = %subscriber.id, %channel, total, "subscribed");
        Ok((subscriber, total))
    }

    /// Removes a subscriber. Unknown ids succeed without effect.
    ///
    /// Returns the total after removal.
    pub async fn unsubscribe(&self, id: SubscriberId) -> usize {
        let removed = self.registry.remove(id).await;
        let total = self.registry.count().await;

        if removed {
            tracing::info!(subscriber_id = %id, total, "unsubscribed");
        } else {
            tracing::debug!(subscriber_id = %id, "unsubscribe for unknown id ignored");
        }
        total
    }

    /// Current subscribers in insertion order.
    pub async fn list(&self) -> Vec<Subscriber> {
        self.registry.list().await
    }

    /// Number of active subscribers.
    pub async fn count(&self) -> usize {
        self.registry.count().await
    }

    /// Creates an event, fans it out, and schedules delivery.
    ///
    /// Returns once the batch is scheduled; delivery happens later.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `title` is blank.
    pub async fn publish(
        &self,
        title: &str,
        event_type: EventType,
    ) -> Result<PublishOutcome, GatewayError> {
        let title = require_text("title", title)?;
        let event = DomainEvent::new(title, event_type);

        let snapshot = self.registry.snapshot().await;
        let report = snapshot.fan_out(&event);
        let failed = report.failures.len();
        let scheduled = self.dispatcher.dispatch(report.notifications);

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            subscribers = snapshot.len(),
            scheduled,
            failed,
            "event published"
        );

        Ok(PublishOutcome {
            event,
            total_subscribers: snapshot.len(),
            scheduled,
            failed,
        })
    }
}

/// Trims `value` and rejects it if nothing is left.
fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::InvalidRequest(format!("{field} is required")));
    }
    Ok(trimmed)
}
