//! Session timing configuration

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest heartbeat or pong deadline the driver will run with
pub const MIN_TIMER: Duration = Duration::from_secs(1);

/// Timers driving heartbeat and reconnect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Relay websocket URL
    pub url: String,
    /// Interval between PING frames
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// How long to wait for PONG before marking the bot asleep
    #[serde(default = "default_pong_deadline_secs")]
    pub pong_deadline_secs: u64,
    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

impl SessionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        SessionConfig {
            url: url.into(),
            heartbeat_secs: default_heartbeat_secs(),
            pong_deadline_secs: default_pong_deadline_secs(),
            reconnect: ReconnectPolicy::default(),
        }
    }

    /// Never shorter than `MIN_TIMER`
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs).max(MIN_TIMER)
    }

    pub fn pong_deadline(&self) -> Duration {
        Duration::from_secs(self.pong_deadline_secs).max(MIN_TIMER)
    }
}

fn default_heartbeat_secs() -> u64 {
    20
}
fn default_pong_deadline_secs() -> u64 {
    20
}

/// Fixed-delay reconnect, retried forever.
///
/// Optional jitter is added on top of the delay and never shortens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectPolicy {
    #[serde(default = "default_reconnect_delay_ms")]
    pub delay_ms: u64,
    #[serde(default)]
    pub jitter_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy {
            delay_ms: default_reconnect_delay_ms(),
            jitter_ms: 0,
        }
    }
}

fn default_reconnect_delay_ms() -> u64 {
    5000
}

impl ReconnectPolicy {
    /// Delay before the next attempt
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        let jitter = if self.jitter_ms > 0 {
            rng.gen_range(0..=self.jitter_ms)
        } else {
            0
        };
        Duration::from_millis(self.delay_ms + jitter)
    }
}
