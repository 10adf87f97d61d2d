use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// How often MPRIS players are polled for changes, in milliseconds
    #[serde(default = "SourceConfig::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl SourceConfig {
    fn default_poll_interval_ms() -> u64 {
        250
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: Self::default_poll_interval_ms(),
        }
    }
}
