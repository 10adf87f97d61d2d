pub mod config;
pub mod display;
pub mod logging;
pub mod players;
pub mod source;

pub use config::Config;
pub use display::DisplayConfig;
pub use logging::LoggingConfig;
