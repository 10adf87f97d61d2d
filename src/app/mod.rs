use crate::app::event::PlayerEvent;
use crate::app::manager::PlayerManager;
pub use crate::app::main_loop::AppMainLoop;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

// Module declarations
pub mod animator;
pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod main_loop;
pub mod manager;
pub mod mpris;
pub mod output;
pub mod player;

/// Event loop state: the player manager and the sources that drive it.
pub struct App<W: std::io::Write> {
    pub manager: PlayerManager<W>,
    events: mpsc::UnboundedReceiver<PlayerEvent>,
    shutdown: CancellationToken,
}
