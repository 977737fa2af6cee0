//! A registered notification recipient.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Channel, SubscriberId};

/// Someone listening for notifications on one channel.
///
/// Identity is the `id`; changing name or channel is modeled as
/// unsubscribe followed by subscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Subscriber {
    /// Generated at subscribe time.
    pub id: SubscriberId,
    /// Non-empty display name.
    pub name: String,
    /// Delivery medium.
    pub channel: Channel,
}

impl Subscriber {
    /// Creates a subscriber with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, channel: Channel) -> Self {
        Self {
            id: SubscriberId::new(),
            name: name.into(),
            channel,
        }
    }
}
