//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::delivery::StreamFrame;

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for commands; server-generated otherwise.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Server-originated envelope with a fresh id.
    #[must_use]
    pub fn server(msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self::reply(uuid::Uuid::new_v4().to_string(), msg_type, payload)
    }

    /// Envelope answering the command with `id`.
    #[must_use]
    pub fn reply(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error envelope with a numeric code and message.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::reply(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }

    /// Wraps a stream frame.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the frame payload cannot be
    /// serialized.
    pub fn from_frame(frame: &StreamFrame) -> Result<Self, serde_json::Error> {
        let msg_type = match frame {
            StreamFrame::Hello(_) => WsMessageType::Hello,
            StreamFrame::Notification(_) => WsMessageType::Notification,
        };
        Ok(Self::server(msg_type, frame.payload_value()?))
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client welcome.
    Hello,
    /// Server → Client delivered notification.
    Notification,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Restrict delivered notifications to the given channels.
    /// An empty list or `"*"` restores all channels.
    Filter {
        /// Channel names (`email`, `sms`, `push`) or `"*"`.
        #[serde(default)]
        channels: Vec<String>,
    },
}
