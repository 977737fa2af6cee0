//! Publish DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainEvent;
use crate::service::PublishOutcome;

/// Request body for `POST /api/publish`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    /// Event title; must not be blank.
    #[serde(default)]
    pub title: Option<String>,
    /// One of `CREATED`, `UPDATED`, `CANCELLED`.
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
}

/// Response body for `POST /api/publish`.
///
/// Returned as soon as fan-out finishes; deliveries are still pending.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    /// The created event.
    pub event: DomainEvent,
    /// Subscribers at fan-out time.
    pub total_subscribers: usize,
    /// Notifications scheduled for delivery.
    pub scheduled: usize,
    /// Subscribers whose notification could not be built.
    pub failed: usize,
}

impl From<PublishOutcome> for PublishResponse {
    fn from(outcome: PublishOutcome) -> Self {
        Self {
            event: outcome.event,
            total_subscribers: outcome.total_subscribers,
            scheduled: outcome.scheduled,
            failed: outcome.failed,
        }
    }
}
