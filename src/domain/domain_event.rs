//! Domain events that trigger notification fan-out.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{EventId, EventType};

/// A titled occurrence published by a client.
///
/// Immutable once created. The publish operation owns it and shares it by
/// `Arc` with every notification built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// Generated at publish time.
    pub id: EventId,
    /// Non-empty human-readable title.
    pub title: String,
    /// Event kind.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Creation timestamp, the reference point for notification latency.
    pub created_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, event_type: EventType) -> Self {
        Self::at(title, event_type, Utc::now())
    }

    /// Creates an event with an explicit creation time.
    #[must_use]
    pub fn at(title: impl Into<String>, event_type: EventType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            event_type,
            created_at,
        }
    }
}
