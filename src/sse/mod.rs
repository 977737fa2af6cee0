//! Server-Sent Events layer.
//!
//! `GET /events` is the primary streaming endpoint. Each connection is one
//! [`StreamingClient`](crate::delivery::StreamingClient).

pub mod handler;
