//! # herald-gateway
//!
//! Notification fan-out gateway. Clients subscribe to a channel (email,
//! sms, push), publish domain events, and watch rendered notifications
//! arrive over Server-Sent Events or WebSocket, each stamped with its
//! render latency.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, SSE, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── SSE Handler (sse/) ─┐
//!     ├── WS Handler (ws/) ───┤
//!     │                       │
//!     ├── NotificationService (service/)
//!     │                       │
//!     ├── SubscriberRegistry + FanoutBus (domain/)
//!     ├── Renderer selector, NotificationBuilder (domain/)
//!     │                       │
//!     └── DeliveryDispatcher ─► ClientSet (delivery/)
//! ```
//!
//! All state lives in memory for the lifetime of the process.

pub mod api;
pub mod app_state;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod service;
pub mod sse;
pub mod ws;
