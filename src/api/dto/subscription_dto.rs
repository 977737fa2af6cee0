//! Subscribe, unsubscribe, and list DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Subscriber;

/// Request body for `POST /api/subscribe`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    /// Display name; must not be blank.
    #[serde(default)]
    pub name: Option<String>,
    /// One of `email`, `sms`, `push`.
    #[serde(default)]
    pub channel: Option<String>,
}

/// Response body for `POST /api/subscribe` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    /// The new subscriber.
    pub subscriber: Subscriber,
    /// Active subscribers after the call.
    pub total: usize,
}

/// Request body for `POST /api/unsubscribe`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnsubscribeRequest {
    /// Subscriber id (UUID).
    #[serde(default)]
    pub id: Option<String>,
}

/// Response body for `POST /api/unsubscribe`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnsubscribeResponse {
    /// Always `true`; unknown ids also succeed.
    pub ok: bool,
    /// Active subscribers after the call.
    pub total: usize,
}

/// Response body for `GET /api/subscribers`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriberListResponse {
    /// Subscribers in insertion order.
    pub subscribers: Vec<Subscriber>,
    /// Active subscribers.
    pub total: usize,
}
