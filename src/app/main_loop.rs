pub mod signals;

use std::io::Write;

use color_eyre::eyre::bail;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::App;
use crate::app::event::PlayerEvent;
use crate::app::manager::PlayerManager;

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(&mut self) -> color_eyre::Result<()>;
}

impl<W: Write> App<W> {
    pub fn new(
        manager: PlayerManager<W>,
        events: mpsc::UnboundedReceiver<PlayerEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            manager,
            events,
            shutdown,
        }
    }
}

/// Sleep until the scroll tick is due, or forever if none is armed
async fn sleep_until_tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<W: Write> AppMainLoop for App<W> {
    /// Dispatch player events and scroll ticks until shutdown.
    ///
    /// Every handler runs to completion before the next one starts.
    async fn run(&mut self) -> color_eyre::Result<()> {
        log::info!("Entering event-driven main loop");

        loop {
            let next_tick = self.manager.next_tick();

            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    log::info!("Received signal to stop, exiting");
                    self.manager.shutdown()?;
                    return Ok(());
                }

                event = self.events.recv() => {
                    match event {
                        Some(event) => self.manager.handle(event)?,
                        None => {
                            log::error!("Player source closed unexpectedly");
                            bail!("Player source closed unexpectedly");
                        }
                    }
                }

                _ = sleep_until_tick(next_tick) => {
                    self.manager.on_tick()?;
                }
            }
        }
    }
}
