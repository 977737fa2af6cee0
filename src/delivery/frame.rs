//! Frames pushed to streaming clients.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::NotificationMessage;

/// Welcome payload sent once when a streaming client connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Hello {
    /// Always `true`.
    pub ok: bool,
    /// Human-readable greeting.
    pub message: String,
}

impl Hello {
    /// The standard connection confirmation.
    #[must_use]
    pub fn connected() -> Self {
        Self {
            ok: true,
            message: "connected to notification stream".to_string(),
        }
    }
}

/// One unit of output on a streaming connection.
#[derive(Debug, Clone)]
pub enum StreamFrame {
    /// Out-of-band welcome, first frame of every connection.
    Hello(Hello),
    /// A delivered notification.
    Notification(Arc<NotificationMessage>),
}

impl StreamFrame {
    /// Event name used on the wire (`hello` or `notification`).
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Hello(_) => "hello",
            Self::Notification(_) => "notification",
        }
    }

    /// Serializes the frame payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Hello(hello) => serde_json::to_string(hello),
            Self::Notification(msg) => serde_json::to_string(msg.as_ref()),
        }
    }

    /// Payload as a JSON value, for embedding in an envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn payload_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Hello(hello) => serde_json::to_value(hello),
            Self::Notification(msg) => serde_json::to_value(msg.as_ref()),
        }
    }
}
