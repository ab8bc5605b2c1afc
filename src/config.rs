//! Configuration types for nfs-ft-client

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Client configuration
///
/// Only the base URL is required; polling and health-probe pacing default to
/// the values the service was designed around (1.5 s between polls, a health
/// ping every 10 minutes, no poll cap).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the processing service (e.g. `http://localhost:8000`)
    pub base_url: Url,

    /// Status poll pacing for queued tasks
    #[serde(default)]
    pub poll: PollPolicy,

    /// Interval between periodic health probes (default: 10 minutes)
    #[serde(default = "default_health_interval")]
    pub health_interval: Duration,
}

impl ClientConfig {
    /// Create a configuration with default pacing for the given service URL
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            poll: PollPolicy::default(),
            health_interval: default_health_interval(),
        }
    }
}

/// Pacing of the status poll loop
///
/// Injected into the orchestrator so tests (and callers with different
/// latency expectations) can tune it without touching the loop itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollPolicy {
    /// Delay between poll cycles (default: 1.5 seconds)
    #[serde(default = "default_poll_interval")]
    pub interval: Duration,

    /// Maximum number of poll cycles before giving up with a timeout
    /// (default: `None` = poll until a terminal status)
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: default_poll_interval(),
            max_attempts: None,
        }
    }
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(1500)
}

fn default_health_interval() -> Duration {
    Duration::from_secs(10 * 60)
}
