//! WebSocket layer: the same notification stream as `/events`, framed as
//! JSON envelopes, with an optional per-connection channel filter.

pub mod connection;
pub mod filter;
pub mod handler;
pub mod messages;
