// Module declarations
mod app;

use std::time::Duration;

use app::cli::Args;
use app::config::Config;
use app::logging;
use app::main_loop::signals::spawn_signal_listener;
use app::manager::PlayerManager;
use app::{App, AppMainLoop};
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse command line arguments
    let args = Args::parse();

    // Handle --generate-config option
    if let Some(path) = &args.generate_config {
        let config_path = if path.is_dir() {
            path.join("config.toml")
        } else {
            path.clone()
        };
        Config::generate_default(&config_path)?;
        return Ok(());
    }

    // Determine config path for logging later
    let config_path = match args.config.clone() {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    let config_existed = config_path.exists();

    // Malformed config or filters fail here, before anything is written
    let (mut config, config_warnings) = Config::load(Some(config_path.clone()))?;
    config.apply_args(&args)?;

    // The handle keeps the file logger alive until main returns
    let _logger = if config.logging.enabled {
        logging::ensure_log_directory(&config.logging)?;
        let handle = logging::init_logger(&config.logging)?;
        logging::log_startup_info(&config.logging);
        logging::log_config_loading(&config_path, !config_existed);
        for warning in &config_warnings {
            log::warn!("{}", warning);
        }
        Some(handle)
    } else {
        Config::write_warnings(&mut std::io::stderr().lock(), &config_warnings)?;
        None
    };

    if let Some(ref player) = config.players.selected {
        log::info!("Filtering for player: {}", player);
    }
    if !config.players.excluded.is_empty() {
        log::info!("Excluding players: {}", config.players.excluded.join(","));
    }

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone())?;

    let (players, events) =
        app::mpris::connect(Duration::from_millis(config.source.poll_interval_ms)).await?;

    log::info!("Creating player manager");
    let stdout = std::io::stdout().lock();
    let mut manager = PlayerManager::new(config.filters(), &config.display, stdout);
    manager.initialize(players)?;

    let mut app = App::new(manager, events, shutdown);
    let result = app.run().await;

    if config.logging.enabled {
        logging::log_shutdown_info();
    }

    result
}
