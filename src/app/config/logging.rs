use serde::{Deserialize, Serialize};

/// `[logging]` section.
///
/// Logging is off unless enabled here or with `--enable-logging`; `-v`
/// raises the level of an enabled logger. Log lines go to a file and
/// optionally stderr, never to stdout, which carries the bar output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Write a log file at all; off by default so the bar stays quiet
    #[serde(default = "LoggingConfig::default_enabled")]
    pub enabled: bool,
    /// Log level (off, error, warn, info, debug, trace); unknown names mean warn
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// Copy every log line to stderr as well
    #[serde(default = "LoggingConfig::default_log_to_console")]
    pub log_to_console: bool,
    /// Keep lines from earlier runs instead of truncating mediabar.log
    #[serde(default = "LoggingConfig::default_append_to_file")]
    pub append_to_file: bool,
    /// Rotate mediabar.log once it reaches `rotation_size_mb`
    #[serde(default = "LoggingConfig::default_rotate_logs")]
    pub rotate_logs: bool,
    /// Maximum log file size in MB before rotation
    #[serde(default = "LoggingConfig::default_rotation_size_mb")]
    pub rotation_size_mb: u64,
    /// Number of log files to keep when rotating
    #[serde(default = "LoggingConfig::default_keep_log_files")]
    pub keep_log_files: u32,
    /// Log directory; defaults to the data dir under mediabar/logs
    #[serde(default)]
    pub custom_log_path: Option<String>,
}

impl LoggingConfig {
    fn default_enabled() -> bool {
        false
    }

    fn default_level() -> String {
        "warn".to_string()
    }

    fn default_log_to_console() -> bool {
        false
    }

    fn default_append_to_file() -> bool {
        true
    }

    fn default_rotate_logs() -> bool {
        true
    }

    fn default_rotation_size_mb() -> u64 {
        10
    }

    fn default_keep_log_files() -> u32 {
        5
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            level: Self::default_level(),
            log_to_console: Self::default_log_to_console(),
            append_to_file: Self::default_append_to_file(),
            rotate_logs: Self::default_rotate_logs(),
            rotation_size_mb: Self::default_rotation_size_mb(),
            keep_log_files: Self::default_keep_log_files(),
            custom_log_path: None,
        }
    }
}
