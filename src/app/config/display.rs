use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Width of the visible window in characters; match the bar's max-length
    #[serde(default = "DisplayConfig::default_max_length")]
    pub max_length: usize,
    /// Text scrolled when no player is shown
    #[serde(default = "DisplayConfig::default_default_text")]
    pub default_text: String,
    /// Delay between scroll steps in milliseconds
    #[serde(default = "DisplayConfig::default_scroll_interval_ms")]
    pub scroll_interval_ms: u64,
}

impl DisplayConfig {
    fn default_max_length() -> usize {
        40
    }

    fn default_default_text() -> String {
        "Nothing playing".to_string()
    }

    fn default_scroll_interval_ms() -> u64 {
        300
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_length: Self::default_max_length(),
            default_text: Self::default_default_text(),
            scroll_interval_ms: Self::default_scroll_interval_ms(),
        }
    }
}
