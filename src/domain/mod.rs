//! Domain layer: events, subscribers, rendering, and fan-out.
//!
//! Everything here is synchronous and transport-agnostic except the
//! registry lock. Delivery to streaming clients lives in
//! [`crate::delivery`].

pub mod channel;
pub mod domain_event;
pub mod fanout_bus;
pub mod ids;
pub mod listener;
pub mod notification;
pub mod renderer;
pub mod subscriber;
pub mod subscriber_registry;

pub use channel::{Channel, EventType};
pub use domain_event::DomainEvent;
pub use fanout_bus::{FanoutBus, FanoutReport};
pub use ids::{EventId, NotificationId, SubscriberId};
pub use listener::{Listener, ListenerError};
pub use notification::{NotificationBuilder, NotificationMessage};
pub use renderer::Renderer;
pub use subscriber::Subscriber;
pub use subscriber_registry::SubscriberRegistry;
