use crate::app::cli::Args;
use crate::app::config::display::DisplayConfig;
use crate::app::config::logging::LoggingConfig;
use crate::app::config::players::PlayersConfig;
use crate::app::config::source::SourceConfig;
use crate::app::player::Filters;
use color_eyre::eyre::{WrapErr, bail, eyre};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Known sections and the keys each one accepts
const KNOWN_FIELDS: &[(&str, &[&str])] = &[
    (
        "display",
        &["max_length", "default_text", "scroll_interval_ms"],
    ),
    ("players", &["selected", "excluded"]),
    ("source", &["poll_interval_ms"]),
    (
        "logging",
        &[
            "enabled",
            "level",
            "log_to_console",
            "append_to_file",
            "rotate_logs",
            "rotation_size_mb",
            "keep_log_files",
            "custom_log_path",
        ],
    ),
];

/// Edit distance between two strings, counted in characters
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(a_char != *b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b_chars.len()]
}

/// Closest candidate to `unknown`, if any is close enough to be a typo
fn find_similar<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let unknown_lower = unknown.to_lowercase();
    candidates
        .iter()
        .map(|&candidate| {
            let distance = levenshtein_distance(&unknown_lower, &candidate.to_lowercase());
            (candidate, distance)
        })
        .filter(|&(candidate, distance)| {
            let threshold = (unknown.len().max(candidate.len()) / 2).max(3);
            distance <= threshold
        })
        .min_by_key(|&(_, distance)| distance)
        .map(|(candidate, _)| candidate)
}

fn unknown_section_warning(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("Unknown config section: [{}] (did you mean: [{}]?)", key, s),
        None => format!("Unknown config section: [{}]", key),
    }
}

fn unknown_option_warning(section: &str, key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(
            "Unknown option in [{}]: {} (did you mean: {}?)",
            section, key, s
        ),
        None => format!("Unknown option in [{}]: {}", section, key),
    }
}

impl Config {
    /// Returns the default config file path, e.g. ~/.config/mediabar/config.toml
    pub fn default_config_path() -> color_eyre::Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| eyre!("Could not determine config directory"))?;
        Ok(config_dir.join("mediabar").join("config.toml"))
    }

    /// Load the config file, creating a default one when it does not exist.
    ///
    /// Returns the config together with warnings about unknown options;
    /// those are logged once the logger is running, or go to stderr
    /// through `write_warnings` when logging is off.
    pub fn load(config_path: Option<PathBuf>) -> color_eyre::Result<(Self, Vec<String>)> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_path, &toml_string)?;

            eprintln!("Created default config file at: {}", config_path.display());
            return Ok((default_config, Vec::new()));
        }

        let contents = std::fs::read_to_string(&config_path)
            .wrap_err_with(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml_str(&contents)
            .wrap_err_with(|| format!("Invalid config file {}", config_path.display()))
    }

    /// Parse config file contents, collecting unknown-option warnings.
    pub fn from_toml_str(contents: &str) -> color_eyre::Result<(Self, Vec<String>)> {
        let warnings = Self::check_unknown_fields(contents);
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok((config, warnings))
    }

    /// Check for unknown sections and keys and return warnings
    fn check_unknown_fields(contents: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        let Ok(table) = toml::from_str::<toml::Table>(contents) else {
            // The main parser reports the syntax error
            return warnings;
        };

        let sections: Vec<&str> = KNOWN_FIELDS.iter().map(|(section, _)| *section).collect();

        for (key, value) in &table {
            let Some((section, fields)) = KNOWN_FIELDS.iter().find(|(s, _)| s == key) else {
                warnings.push(unknown_section_warning(key, find_similar(key, &sections)));
                continue;
            };

            if let toml::Value::Table(entries) = value {
                for field in entries.keys() {
                    if !fields.contains(&field.as_str()) {
                        let suggestion = find_similar(field, fields);
                        warnings.push(unknown_option_warning(section, field, suggestion));
                    }
                }
            }
        }

        warnings
    }

    /// Reject values the animator cannot work with.
    pub fn validate(&self) -> color_eyre::Result<()> {
        if self.display.max_length == 0 {
            bail!("display.max_length must be at least 1");
        }
        if self.display.scroll_interval_ms == 0 {
            bail!("display.scroll_interval_ms must be at least 1");
        }
        if self.source.poll_interval_ms == 0 {
            bail!("source.poll_interval_ms must be at least 1");
        }
        if let Some(name) = self.players.excluded.iter().find(|n| n.trim().is_empty()) {
            bail!("players.excluded contains an empty player name: {:?}", name);
        }
        Ok(())
    }

    /// Apply command line overrides on top of the file values.
    pub fn apply_args(&mut self, args: &Args) -> color_eyre::Result<()> {
        if let Some(ref player) = args.player {
            self.players.selected = Some(player.clone());
        }
        if let Some(ref exclude) = args.exclude {
            self.players.excluded = Filters::parse_excluded(exclude)?;
        }
        if args.enable_logging {
            self.logging.enabled = true;
        }
        match args.verbose {
            0 => {}
            1 => self.logging.level = "info".to_string(),
            2 => self.logging.level = "debug".to_string(),
            _ => self.logging.level = "trace".to_string(),
        }
        Ok(())
    }

    pub fn filters(&self) -> Filters {
        Filters::new(self.players.selected.clone(), self.players.excluded.clone())
    }

    /// Write config warnings one per line, for when no logger is running
    pub fn write_warnings<W: Write>(out: &mut W, warnings: &[String]) -> std::io::Result<()> {
        for warning in warnings {
            writeln!(out, "Warning: {}", warning)?;
        }
        Ok(())
    }

    /// Generate a default config file at the specified path
    pub fn generate_default(path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        if path.exists() {
            bail!("Config file already exists at: {}", path.display());
        }

        let toml_string = toml::to_string_pretty(&Config::default())?;
        std::fs::write(path, &toml_string)?;

        eprintln!("Generated default config at: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_warnings_written_one_per_line() {
        let (_, warnings) = Config::from_toml_str("[dispaly]\n").unwrap();
        let mut out = Vec::new();
        Config::write_warnings(&mut out, &warnings).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("Warning: "));
        assert!(out.contains("display"));

        let mut out = Vec::new();
        Config::write_warnings(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let (config, warnings) = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.max_length, 40);
        assert_eq!(config.display.scroll_interval_ms, 300);
        assert!(!config.logging.enabled);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_default_config_round_trips() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        let (config, warnings) = Config::from_toml_str(&toml_string).unwrap();
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let contents = r#"
            [display]
            max_length = 25

            [players]
            excluded = ["firefox", "chromium"]
        "#;
        let (config, _) = Config::from_toml_str(contents).unwrap();
        assert_eq!(config.display.max_length, 25);
        assert_eq!(config.display.default_text, "Nothing playing");
        assert_eq!(config.players.excluded, vec!["firefox", "chromium"]);
        assert_eq!(config.players.selected, None);
    }

    #[test]
    fn test_unknown_fields_suggest_corrections() {
        let contents = r#"
            [dispaly]
            max_length = 25

            [players]
            exclude = ["firefox"]
            zzzzzzzzzzzzzzzz = 1
        "#;
        let (_, warnings) = Config::from_toml_str(contents).unwrap();
        assert!(warnings.contains(
            &"Unknown config section: [dispaly] (did you mean: [display]?)".to_string()
        ));
        assert!(warnings.contains(
            &"Unknown option in [players]: exclude (did you mean: excluded?)".to_string()
        ));
        assert!(warnings.contains(&"Unknown option in [players]: zzzzzzzzzzzzzzzz".to_string()));
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(Config::from_toml_str("[display]\nmax_length = 0").is_err());
        assert!(Config::from_toml_str("[display]\nscroll_interval_ms = 0").is_err());
        assert!(Config::from_toml_str("[players]\nexcluded = [\"\"]").is_err());
        assert!(Config::from_toml_str("[display]\nmax_length = \"wide\"").is_err());
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("display", "display"), 0);
    }

    #[test]
    fn test_args_override_file() {
        let mut config = Config::default();
        config.players.excluded = vec!["mpv".to_string()];
        let args = Args::parse_from([
            "mediabar",
            "--player",
            "spotify",
            "-x",
            "firefox,chromium",
            "--enable-logging",
            "-vv",
        ]);
        config.apply_args(&args).unwrap();

        assert_eq!(config.players.selected.as_deref(), Some("spotify"));
        assert_eq!(config.players.excluded, vec!["firefox", "chromium"]);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, "debug");

        let filters = config.filters();
        assert!(filters.admits("spotify"));
        assert!(!filters.admits("mpv"));
    }

    #[test]
    fn test_malformed_exclude_arg_fails() {
        let mut config = Config::default();
        let args = Args::parse_from(["mediabar", "--exclude", "firefox,,mpv"]);
        assert!(config.apply_args(&args).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        for (flag, level) in [("-v", "info"), ("-vvv", "trace"), ("-vvvvv", "trace")] {
            let mut config = Config::default();
            let args = Args::parse_from(["mediabar", flag]);
            config.apply_args(&args).unwrap();
            assert_eq!(config.logging.level, level);
        }

        let mut config = Config::default();
        config.apply_args(&Args::parse_from(["mediabar"])).unwrap();
        assert_eq!(config.logging.level, "warn");
    }
}
