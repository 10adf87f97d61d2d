use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mediabar")]
#[command(version)]
#[command(about = "Now-playing text with scrolling for status bars", long_about = None)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Comma-separated list of excluded players
    #[arg(short = 'x', long)]
    pub exclude: Option<String>,

    /// Only show this player
    #[arg(long)]
    pub player: Option<String>,

    /// Write a log file
    #[arg(long)]
    pub enable_logging: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a default config file to this path and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["mediabar"]);
        assert_eq!(args.verbose, 0);
        assert!(args.exclude.is_none());
        assert!(args.player.is_none());
        assert!(!args.enable_logging);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "mediabar",
            "-vvv",
            "-x",
            "firefox,mpv",
            "--player",
            "spotify",
            "--enable-logging",
            "--config",
            "/tmp/mediabar.toml",
        ]);
        assert_eq!(args.verbose, 3);
        assert_eq!(args.exclude.as_deref(), Some("firefox,mpv"));
        assert_eq!(args.player.as_deref(), Some("spotify"));
        assert!(args.enable_logging);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/mediabar.toml")));
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
