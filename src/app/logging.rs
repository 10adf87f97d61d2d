use crate::app::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Base name of the log file
const LOG_FILE_BASENAME: &str = "mediabar";

/// Map a configured level name to a filter; unknown names fall back to warn
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Initialize the file logger.
///
/// The returned handle must stay alive for as long as logging is wanted.
/// Nothing is ever logged to stdout, which carries the bar protocol.
pub fn init_logger(config: &LoggingConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let log_level = parse_level(&config.level);

    let mut logger = Logger::try_with_str(log_level.to_string().to_lowercase())?
        .log_to_file(
            FileSpec::default()
                .directory(get_log_directory(config))
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .format_for_files(custom_log_format)
        .use_utc();

    if config.append_to_file {
        logger = logger.append();
    }

    if config.rotate_logs {
        logger = logger.rotate(
            Criterion::Size(config.rotation_size_mb * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(config.keep_log_files as usize),
        );
    }

    if config.log_to_console {
        logger = logger
            .duplicate_to_stderr(flexi_logger::Duplicate::All)
            .format_for_stderr(custom_log_format);
    }

    let handle = logger.start()?;
    log::info!("Logger initialized with level: {:?}", log_level);
    log::info!("Log file location: {}", get_log_file_path(config).display());

    Ok(handle)
}

/// Get the log directory, honouring `custom_log_path`
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(ref custom) = config.custom_log_path {
        return PathBuf::from(custom);
    }

    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediabar/logs")
}

/// Get the full path to the main log file
pub fn get_log_file_path(config: &LoggingConfig) -> PathBuf {
    get_log_directory(config).join(format!("{}.log", LOG_FILE_BASENAME))
}

/// Custom log format for file output
fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// Ensure log directory exists
pub fn ensure_log_directory(config: &LoggingConfig) -> color_eyre::Result<()> {
    let log_dir = get_log_directory(config);
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }
    Ok(())
}

pub fn log_startup_info(config: &LoggingConfig) {
    log::info!("=== mediabar starting ===");
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log::info!("OS: {}", std::env::consts::OS);
    log::info!("Log file: {}", get_log_file_path(config).display());
}

pub fn log_shutdown_info() {
    log::info!("=== mediabar shutting down ===");
}

/// Log configuration loading
pub fn log_config_loading(config_path: &Path, created: bool) {
    if created {
        log::info!("Created default config file at: {}", config_path.display());
    } else {
        log::info!("Loaded config file from: {}", config_path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARNING"), LevelFilter::Warn);
        assert_eq!(parse_level("trace"), LevelFilter::Trace);
        assert_eq!(parse_level("loud"), LevelFilter::Warn);
    }

    #[test]
    fn test_custom_log_directory() {
        let config = LoggingConfig {
            custom_log_path: Some("/tmp/mediabar-logs".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(get_log_directory(&config), PathBuf::from("/tmp/mediabar-logs"));
        assert_eq!(
            get_log_file_path(&config),
            PathBuf::from("/tmp/mediabar-logs/mediabar.log")
        );
    }
}
