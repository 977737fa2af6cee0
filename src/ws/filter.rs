//! Per-connection channel filter.
//!
//! A WebSocket client may narrow its stream to some channels. The filter
//! only affects what this connection forwards; the connection still counts
//! as one streaming client and still receives every broadcast.

use std::collections::HashSet;

use crate::delivery::StreamFrame;
use crate::domain::Channel;

/// Which channels a WebSocket connection forwards.
#[derive(Debug, Clone)]
pub struct ChannelFilter {
    /// Explicit channels. Ignored while `all` is set.
    channels: HashSet<Channel>,
    all: bool,
}

impl Default for ChannelFilter {
    fn default() -> Self {
        Self {
            channels: HashSet::new(),
            all: true,
        }
    }
}

impl ChannelFilter {
    /// Creates a filter that passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the filter. An empty slice or `wildcard` passes everything.
    pub fn set(&mut self, channels: &[Channel], wildcard: bool) {
        self.channels = channels.iter().copied().collect();
        self.all = wildcard || self.channels.is_empty();
    }

    /// Returns `true` if notifications on `channel` pass.
    #[must_use]
    pub fn matches(&self, channel: Channel) -> bool {
        self.all || self.channels.contains(&channel)
    }

    /// Returns `true` if `frame` should be forwarded. Hello always passes.
    #[must_use]
    pub fn admits(&self, frame: &StreamFrame) -> bool {
        match frame {
            StreamFrame::Hello(_) => true,
            StreamFrame::Notification(msg) => self.matches(msg.channel),
        }
    }

    /// Returns `true` if every channel passes.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.all
    }

    /// Explicit channels, sorted by declaration order.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| self.channels.contains(c))
            .collect()
    }
}
