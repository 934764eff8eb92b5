//! Per-connection limits and timers

use std::time::Duration;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 512;
pub const DEFAULT_PONG_WAIT: Duration = Duration::from_secs(60);
pub const DEFAULT_WRITE_WAIT: Duration = Duration::from_secs(10);

/// Keepalive period derived from the idle deadline (9/10 of it)
pub fn ping_period_for(pong_wait: Duration) -> Duration {
    pong_wait * 9 / 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Capacity of the outbound queue
    pub queue_capacity: usize,
    /// Largest inbound frame accepted, in bytes
    pub max_message_size: usize,
    /// Idle deadline for the read side; any inbound frame extends it
    pub pong_wait: Duration,
    /// Interval of transport pings; must be shorter than `pong_wait`
    pub ping_period: Duration,
    /// Deadline for a single write, including the final close frame
    pub write_wait: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            pong_wait: DEFAULT_PONG_WAIT,
            ping_period: ping_period_for(DEFAULT_PONG_WAIT),
            write_wait: DEFAULT_WRITE_WAIT,
        }
    }
}

impl SessionConfig {
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_max_message_size(mut self, bytes: usize) -> Self {
        self.max_message_size = bytes;
        self
    }

    /// Set the idle deadline and re-derive the ping period from it
    pub fn with_pong_wait(mut self, pong_wait: Duration) -> Self {
        self.pong_wait = pong_wait;
        self.ping_period = ping_period_for(pong_wait);
        self
    }

    pub fn with_ping_period(mut self, period: Duration) -> Self {
        self.ping_period = period;
        self
    }

    pub fn with_write_wait(mut self, write_wait: Duration) -> Self {
        self.write_wait = write_wait;
        self
    }
}
