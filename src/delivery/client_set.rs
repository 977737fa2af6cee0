//! The set of open streaming connections.
//!
//! [`ClientSet`] wraps a [`tokio::sync::broadcast`] channel. Each open
//! connection owns one receiver; membership is exactly the set of live
//! receivers. Connecting subscribes a receiver, dropping the
//! [`StreamingClient`] unsubscribes it, and a broadcast reaches whoever is
//! subscribed at the moment it is sent.
//!
//! Because every connection drains its own receiver, a client leaving in
//! the middle of a broadcast cannot skip or duplicate delivery to the
//! others.
//!
//! Cancelling the set's shutdown token, directly or through
//! [`ClientSet::close`], ends every open stream.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::frame::{Hello, StreamFrame};
use crate::domain::NotificationMessage;

/// Multicast sink shared by the dispatcher and all streaming endpoints.
///
/// Cheap to clone. When a slow client falls more than `capacity` frames
/// behind, it skips the oldest ones.
#[derive(Debug, Clone)]
pub struct ClientSet {
    sender: broadcast::Sender<Arc<NotificationMessage>>,
    closed: CancellationToken,
}

impl ClientSet {
    /// Creates a client set with the given per-client buffer capacity.
    ///
    /// A capacity of zero is clamped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_shutdown(capacity, CancellationToken::new())
    }

    /// Creates a client set whose streams end when `shutdown` is cancelled.
    #[must_use]
    pub fn with_shutdown(capacity: usize, shutdown: CancellationToken) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            closed: shutdown,
        }
    }

    /// Adds a client. Its first frame will be a [`Hello`].
    #[must_use]
    pub fn connect(&self) -> StreamingClient {
        let client = StreamingClient {
            id: uuid::Uuid::new_v4(),
            hello: Some(Hello::connected()),
            receiver: self.sender.subscribe(),
            closed: self.closed.clone(),
        };
        tracing::info!(client_id = %client.id, clients = self.len(), "streaming client connected");
        client
    }

    /// Sends a notification to every currently connected client.
    ///
    /// Returns how many clients it reached; zero means it was dropped.
    pub fn broadcast(&self, notification: Arc<NotificationMessage>) -> usize {
        self.sender.send(notification).unwrap_or(0)
    }

    /// Number of connected clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns `true` if no client is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ends every open stream after its pending hello, if any.
    pub fn close(&self) {
        self.closed.cancel();
    }
}

/// One open streaming connection.
///
/// Dropping it removes the client from its [`ClientSet`].
#[derive(Debug)]
pub struct StreamingClient {
    id: uuid::Uuid,
    hello: Option<Hello>,
    receiver: broadcast::Receiver<Arc<NotificationMessage>>,
    closed: CancellationToken,
}

impl StreamingClient {
    /// Connection id, for logging.
    #[must_use]
    pub const fn id(&self) -> uuid::Uuid {
        self.id
    }

    /// Waits for the next frame.
    ///
    /// The first call returns the welcome frame. Returns `None` once the
    /// client set has been closed or dropped.
    pub async fn recv(&mut self) -> Option<StreamFrame> {
        if let Some(hello) = self.hello.take() {
            return Some(StreamFrame::Hello(hello));
        }
        loop {
            let received = tokio::select! {
                biased;
                () = self.closed.cancelled() => return None,
                received = self.receiver.recv() => received,
            };
            match received {
                Ok(msg) => return Some(StreamFrame::Notification(msg)),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(client_id = %self.id, lagged = n, "streaming client lagged; frames skipped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for StreamingClient {
    fn drop(&mut self) {
        tracing::info!(client_id = %self.id, "streaming client disconnected");
    }
}
