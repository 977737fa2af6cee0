//! Service layer: business logic orchestration.
//!
//! [`NotificationService`] validates input, coordinates the
//! [`SubscriberRegistry`](crate::domain::SubscriberRegistry), and hands
//! fan-out batches to the [`DeliveryDispatcher`](crate::delivery::DeliveryDispatcher).

pub mod notification_service;

pub use notification_service::{NotificationService, PublishOutcome};
