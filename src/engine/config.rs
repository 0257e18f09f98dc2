use std::time::Duration;

use crate::storage::DEFAULT_CAPACITY;

/// Tunables for a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Records retained in the window.
    pub capacity: usize,
    /// Time between two live events.
    pub tick_interval: Duration,
    /// Bound of the channel between the event producer and the store.
    pub channel_capacity: usize,
    /// Records listed in the live activity feed.
    pub feed_length: usize
}

impl DashboardConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_feed_length(mut self, feed_length: usize) -> Self {
        self.feed_length = feed_length;
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            tick_interval: Duration::from_secs(5),
            channel_capacity: 256,
            feed_length: 10
        }
    }
}
