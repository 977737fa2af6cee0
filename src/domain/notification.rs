//! Rendered notifications and the per-subscriber builder that produces them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::listener::{Listener, ListenerError};
use super::renderer::{self, Renderer};
use super::{Channel, DomainEvent, EventId, EventType, NotificationId, Subscriber, SubscriberId};

/// One rendered notification for one (event, subscriber) pair.
///
/// Created at fan-out time, immutable, delivered once and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    /// Unique notification id.
    pub id: NotificationId,
    /// Recipient subscriber id.
    pub user_id: SubscriberId,
    /// Recipient display name.
    pub user_name: String,
    /// Channel the notification was rendered for.
    pub channel: Channel,
    /// Source event id.
    pub event_id: EventId,
    /// Source event title.
    pub event_title: String,
    /// Source event kind.
    pub event_type: EventType,
    /// Render time.
    pub sent_at: DateTime<Utc>,
    /// `max(0, sent_at - event.created_at)` in milliseconds.
    pub latency_ms: u64,
    /// Channel-specific human-readable text.
    pub rendered: String,
}

/// Milliseconds from `created_at` to `sent_at`, clamped at zero.
///
/// Clock skew can put `sent_at` before `created_at`; that reads as zero
/// latency rather than a negative value.
#[must_use]
pub fn latency_ms(created_at: DateTime<Utc>, sent_at: DateTime<Utc>) -> u64 {
    u64::try_from((sent_at - created_at).num_milliseconds()).unwrap_or(0)
}

/// Builds the notification for `subscriber` about `event`, stamped now.
#[must_use]
pub fn build(subscriber: &Subscriber, event: &DomainEvent) -> NotificationMessage {
    build_with(renderer::select(subscriber.channel), subscriber, event)
}

fn build_with(
    renderer: Renderer,
    subscriber: &Subscriber,
    event: &DomainEvent,
) -> NotificationMessage {
    let sent_at = Utc::now();
    NotificationMessage {
        id: NotificationId::new(),
        user_id: subscriber.id,
        user_name: subscriber.name.clone(),
        channel: subscriber.channel,
        event_id: event.id,
        event_title: event.title.clone(),
        event_type: event.event_type,
        sent_at,
        latency_ms: latency_ms(event.created_at, sent_at),
        rendered: renderer.render(&subscriber.name, event),
    }
}

/// The update reaction bound to a single subscriber.
///
/// The renderer is resolved once at subscribe time, so publishing never
/// repeats the channel lookup.
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    subscriber: Subscriber,
    renderer: Renderer,
}

impl NotificationBuilder {
    /// Binds a builder to `subscriber`.
    #[must_use]
    pub fn new(subscriber: Subscriber) -> Self {
        let renderer = renderer::select(subscriber.channel);
        Self {
            subscriber,
            renderer,
        }
    }

    /// The subscriber this builder renders for.
    #[must_use]
    pub const fn subscriber(&self) -> &Subscriber {
        &self.subscriber
    }
}

impl Listener for NotificationBuilder {
    fn on_event(&self, event: &DomainEvent) -> Result<NotificationMessage, ListenerError> {
        Ok(build_with(self.renderer, &self.subscriber, event))
    }
}
