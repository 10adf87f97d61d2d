use std::thread;
use std::time::Duration;

use color_eyre::eyre::eyre;
use mpris::{FindingError, PlayerFinder};
use tokio::sync::{mpsc, oneshot};

use super::diff_snapshots;
use crate::app::event::PlayerEvent;
use crate::app::player::{Metadata, PlaybackStatus, Player, PlayerId};

/// Prefix of every MPRIS bus name
const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Start watching MPRIS players on a dedicated thread.
///
/// Returns the players found at startup and a channel of changes after
/// that. The D-Bus connection is blocking, so it lives on its own thread;
/// the thread ends once the receiver is dropped.
pub async fn spawn_watcher(
    poll_interval: Duration,
) -> color_eyre::Result<(Vec<Player>, mpsc::UnboundedReceiver<PlayerEvent>)> {
    let (initial_tx, initial_rx) = oneshot::channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("mpris-watcher".to_string())
        .spawn(move || watch(poll_interval, initial_tx, event_tx))?;

    let initial = initial_rx
        .await
        .map_err(|_| eyre!("MPRIS watcher exited during startup"))?
        .map_err(|e| eyre!("Failed to connect to D-Bus: {}", e))?;

    Ok((initial, event_rx))
}

fn watch(
    poll_interval: Duration,
    initial_tx: oneshot::Sender<Result<Vec<Player>, String>>,
    event_tx: mpsc::UnboundedSender<PlayerEvent>,
) {
    let finder = match PlayerFinder::new() {
        Ok(finder) => finder,
        Err(e) => {
            let _ = initial_tx.send(Err(e.to_string()));
            return;
        }
    };

    let mut previous = match snapshot(&finder) {
        Ok(players) => players,
        Err(e) => {
            let _ = initial_tx.send(Err(e.to_string()));
            return;
        }
    };
    log::info!("Found {} MPRIS players at startup", previous.len());
    if initial_tx.send(Ok(previous.clone())).is_err() {
        return;
    }

    loop {
        thread::sleep(poll_interval);

        let current = match snapshot(&finder) {
            Ok(players) => players,
            Err(e) => {
                log::warn!("Failed to list MPRIS players: {}", e);
                continue;
            }
        };

        for event in diff_snapshots(&previous, &current) {
            log::trace!("MPRIS event: {:?}", event);
            if event_tx.send(event).is_err() {
                log::debug!("Event receiver dropped, stopping MPRIS watcher");
                return;
            }
        }
        previous = current;
    }
}

/// Read every player currently on the bus.
///
/// A player whose properties cannot be read is left out of this snapshot.
fn snapshot(finder: &PlayerFinder) -> Result<Vec<Player>, FindingError> {
    let players = match finder.find_all() {
        Ok(players) => players,
        Err(FindingError::NoPlayerFound) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    Ok(players.iter().filter_map(read_player).collect())
}

fn read_player(player: &mpris::Player) -> Option<Player> {
    let bus_name = player.bus_name().to_string();
    let id = PlayerId::new(bus_name.trim_start_matches(MPRIS_BUS_PREFIX));

    let status = match player.get_playback_status() {
        Ok(status) => convert_status(status),
        Err(e) => {
            log::debug!("Failed to read playback status of {}: {}", id, e);
            return None;
        }
    };

    let metadata = match player.get_metadata() {
        Ok(metadata) => {
            let artists = metadata.artists().unwrap_or_default();
            let track_id = metadata.track_id();
            Metadata::new(
                &artists,
                metadata.title(),
                track_id.as_ref().map(|t| t.as_str()),
            )
        }
        Err(e) => {
            log::debug!("Failed to read metadata of {}: {}", id, e);
            return None;
        }
    };

    Some(Player::new(id, status, metadata))
}

fn convert_status(status: mpris::PlaybackStatus) -> PlaybackStatus {
    match status {
        mpris::PlaybackStatus::Playing => PlaybackStatus::Playing,
        mpris::PlaybackStatus::Paused => PlaybackStatus::Paused,
        mpris::PlaybackStatus::Stopped => PlaybackStatus::Stopped,
    }
}
