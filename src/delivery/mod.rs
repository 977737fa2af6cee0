//! Delivery layer: getting fan-out batches to streaming clients.
//!
//! ```text
//! publish ─► FanoutBus ─► batch ─► DeliveryDispatcher ─► (random delay per item)
//!                                        │
//!                                        ▼
//!                                   ClientSet (broadcast)
//!                                   ├─► SSE connection
//!                                   ├─► SSE connection
//!                                   └─► WebSocket connection
//! ```

pub mod client_set;
pub mod dispatcher;
pub mod frame;

pub use client_set::{ClientSet, StreamingClient};
pub use dispatcher::{DEFAULT_MAX_DELAY, DeliveryDispatcher, DeliveryStats};
pub use frame::{Hello, StreamFrame};
