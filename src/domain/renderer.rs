//! Per-channel rendering strategies.
//!
//! Rendering is a dispatch table from [`Channel`] to a pure function.
//! Adding a channel needs a new variant, a render function, and one arm in
//! [`select`]; fan-out and delivery stay untouched.

use super::{Channel, DomainEvent};

/// Signature shared by all channel renderers.
pub type RenderFn = fn(&str, &DomainEvent) -> String;

/// Renders human-readable notification text for one channel.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    channel: Channel,
    render: RenderFn,
}

impl Renderer {
    /// Channel this renderer targets.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Renders the notification text for `subscriber_name` about `event`.
    ///
    /// Pure: no side effects, same input always yields the same text.
    #[must_use]
    pub fn render(&self, subscriber_name: &str, event: &DomainEvent) -> String {
        (self.render)(subscriber_name, event)
    }
}

/// Returns the renderer for `channel`.
#[must_use]
pub fn select(channel: Channel) -> Renderer {
    let render: RenderFn = match channel {
        Channel::Email => render_email,
        Channel::Sms => render_sms,
        Channel::Push => render_push,
    };
    Renderer { channel, render }
}

fn render_email(name: &str, event: &DomainEvent) -> String {
    format!("📧 Email to {name}: [{}] {}", event.event_type, event.title)
}

fn render_sms(name: &str, event: &DomainEvent) -> String {
    format!("📱 SMS to {name}: [{}] {}", event.event_type, event.title)
}

fn render_push(name: &str, event: &DomainEvent) -> String {
    format!("🔔 Push to {name}: [{}] {}", event.event_type, event.title)
}
