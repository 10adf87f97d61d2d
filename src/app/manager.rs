use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;

use crate::app::animator::{Animator, Tick};
use crate::app::config::DisplayConfig;
use crate::app::event::PlayerEvent;
use crate::app::output::OutputSink;
use crate::app::player::{
    Filters, Metadata, PlaybackStatus, Player, PlayerId, PlayerRegistry, truncate,
};

/// What the bar is showing right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing is being animated
    Cleared,
    /// The idle text scrolls, attributed to no player
    Idle,
    /// A player's text scrolls
    Scrolling { owner: PlayerId, text: String },
    /// A player's text is shown without scrolling
    Frozen { owner: PlayerId, text: String },
}

impl DisplayState {
    pub fn owner(&self) -> Option<&PlayerId> {
        match self {
            DisplayState::Scrolling { owner, .. } | DisplayState::Frozen { owner, .. } => {
                Some(owner)
            }
            DisplayState::Cleared | DisplayState::Idle => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayState::Scrolling { text, .. } | DisplayState::Frozen { text, .. } => {
                Some(text.as_str())
            }
            DisplayState::Cleared | DisplayState::Idle => None,
        }
    }
}

/// Decides which player is on the bar and drives the animator.
pub struct PlayerManager<W: Write> {
    filters: Filters,
    registry: PlayerRegistry,
    animator: Animator,
    sink: OutputSink<W>,
    default_text: String,
    display: DisplayState,
}

impl<W: Write> PlayerManager<W> {
    pub fn new(filters: Filters, config: &DisplayConfig, writer: W) -> Self {
        Self {
            filters,
            registry: PlayerRegistry::new(),
            animator: Animator::new(
                config.max_length,
                Duration::from_millis(config.scroll_interval_ms),
            ),
            sink: OutputSink::new(writer),
            default_text: config.default_text.clone(),
            display: DisplayState::Cleared,
        }
    }

    /// Register the players that exist at startup.
    pub fn initialize(&mut self, players: Vec<Player>) -> color_eyre::Result<()> {
        for player in players {
            if !self.filters.admits(&player.name) {
                log::debug!("{} is filtered out, skipping it", player.id);
                continue;
            }
            self.init_player(player)?;
        }

        if self.registry.is_empty() {
            log::info!("No players found, showing default text");
            let text = self.default_text.clone();
            self.start_scrolling(&text, None)?;
        }
        Ok(())
    }

    pub fn handle(&mut self, event: PlayerEvent) -> color_eyre::Result<()> {
        match event {
            PlayerEvent::Appeared(player) => self.on_player_appeared(player),
            PlayerEvent::Vanished(id) => self.on_player_vanished(&id),
            PlayerEvent::StatusChanged(id, status) => self.on_status_changed(&id, status),
            PlayerEvent::MetadataChanged(id, metadata) => self.on_metadata_changed(&id, metadata),
        }
    }

    fn init_player(&mut self, player: Player) -> color_eyre::Result<()> {
        log::info!("Initialize new player: {}", player.id);
        let id = player.id.clone();
        let metadata = player.metadata.clone();
        self.registry.register(player);
        self.on_metadata_changed(&id, metadata)
    }

    pub fn on_player_appeared(&mut self, player: Player) -> color_eyre::Result<()> {
        log::info!("Player has appeared: {}", player.id);
        if self.filters.is_excluded(&player.name) {
            log::debug!("{} is in the exclude list, skipping it", player.name);
            return Ok(());
        }
        if !self.filters.admits(&player.name) {
            log::debug!("{} is not the selected player, skipping it", player.name);
            return Ok(());
        }
        self.init_player(player)
    }

    pub fn on_player_vanished(&mut self, id: &PlayerId) -> color_eyre::Result<()> {
        if self.registry.remove(id).is_none() {
            log::debug!("Untracked player {} vanished, ignoring", id);
            return Ok(());
        }
        log::info!("Player {} has vanished", id);

        if self.display.owner() == Some(id) || self.animator.owner() == Some(id) {
            self.animator.stop();
            self.display = DisplayState::Cleared;
        }
        self.show_most_important_player()
    }

    pub fn on_status_changed(
        &mut self,
        id: &PlayerId,
        status: PlaybackStatus,
    ) -> color_eyre::Result<()> {
        let Some(player) = self.registry.get_mut(id) else {
            log::debug!("Status change for untracked player {}, ignoring", id);
            return Ok(());
        };
        log::debug!("Playback status changed for player {}: {}", id, status);
        player.status = status;
        let metadata = player.metadata.clone();

        if self.display.owner() == Some(id) {
            let text = self.display.text().unwrap_or_default().to_string();
            match status {
                PlaybackStatus::Paused => {
                    self.animator.stop();
                    if text.is_empty() {
                        self.display = DisplayState::Cleared;
                    } else {
                        self.emit(&truncate(&text, self.animator.width()), Some(id))?;
                        self.display = DisplayState::Frozen {
                            owner: id.clone(),
                            text,
                        };
                    }
                }
                PlaybackStatus::Playing => {
                    if !text.is_empty() {
                        self.start_scrolling(&text, Some(id.clone()))?;
                    }
                }
                PlaybackStatus::Stopped => {}
            }
        }

        self.on_metadata_changed(id, metadata)
    }

    pub fn on_metadata_changed(
        &mut self,
        id: &PlayerId,
        metadata: Metadata,
    ) -> color_eyre::Result<()> {
        let Some(player) = self.registry.get_mut(id) else {
            log::debug!("Metadata change for untracked player {}, ignoring", id);
            return Ok(());
        };
        log::debug!("Metadata changed for player {}", id);
        player.metadata = metadata;
        let text = player.display_text();
        let playing = player.is_playing();

        let top = self.registry.most_important().map(|p| p.id.clone());
        if top.as_ref().is_some_and(|top| top != id) {
            log::debug!(
                "Player {} outranks {}, skipping",
                top.as_ref().map_or("", PlayerId::as_str),
                id
            );
            if self.animator.owner() == Some(id) {
                self.animator.stop();
                self.display = DisplayState::Cleared;
            }
            return Ok(());
        }

        if text.is_empty() {
            let default_text = self.default_text.clone();
            self.start_scrolling(&default_text, None)
        } else if playing {
            self.start_scrolling(&text, Some(id.clone()))
        } else {
            self.animator.stop();
            self.emit(&truncate(&text, self.animator.width()), Some(id))?;
            self.display = DisplayState::Frozen {
                owner: id.clone(),
                text,
            };
            Ok(())
        }
    }

    fn show_most_important_player(&mut self) -> color_eyre::Result<()> {
        match self.registry.most_important() {
            Some(player) => {
                log::debug!("Showing most important player: {}", player.id);
                let id = player.id.clone();
                let metadata = player.metadata.clone();
                self.on_metadata_changed(&id, metadata)
            }
            None => {
                let text = self.default_text.clone();
                self.start_scrolling(&text, None)
            }
        }
    }

    fn start_scrolling(&mut self, text: &str, owner: Option<PlayerId>) -> color_eyre::Result<()> {
        match self.animator.start(text, owner.clone()) {
            Some(frame) => {
                self.emit(&frame, owner.as_ref())?;
                self.display = match owner {
                    Some(owner) => DisplayState::Scrolling {
                        owner,
                        text: text.to_string(),
                    },
                    None => DisplayState::Idle,
                };
            }
            None => {
                self.sink.emit_blank()?;
                self.display = DisplayState::Cleared;
            }
        }
        Ok(())
    }

    /// Advance the scroll animation by one step.
    pub fn on_tick(&mut self) -> color_eyre::Result<()> {
        let top_playing = self.registry.first_playing().map(|p| p.id.clone());
        match self.animator.tick(top_playing.as_ref()) {
            Tick::Render(frame) => {
                let owner = self.animator.owner().cloned();
                self.emit(&frame, owner.as_ref())
            }
            Tick::Cancelled => Ok(()),
        }
    }

    /// Stop animating and clear the bar.
    pub fn shutdown(&mut self) -> color_eyre::Result<()> {
        self.animator.stop();
        self.display = DisplayState::Cleared;
        self.sink.emit_blank()?;
        Ok(())
    }

    fn emit(&mut self, text: &str, owner: Option<&PlayerId>) -> color_eyre::Result<()> {
        let player = owner.and_then(|id| self.registry.get(id));
        self.sink.emit(text, player)?;
        Ok(())
    }

    /// When the next scroll tick is due, if one is armed
    pub fn next_tick(&self) -> Option<Instant> {
        self.animator.deadline()
    }

    #[cfg(test)]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    #[cfg(test)]
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[cfg(test)]
    pub fn sink(&self) -> &OutputSink<W> {
        &self.sink
    }
}
