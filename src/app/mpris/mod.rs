//! MPRIS player source
//!
//! Players are polled over D-Bus and every snapshot is diffed against the
//! previous one to produce the lifecycle and property events consumed by
//! the player manager.

#[cfg(target_os = "linux")]
pub mod watcher;

use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::event::PlayerEvent;
use crate::app::player::Player;

/// Connect to the session bus and start watching players.
///
/// Returns the players present right now and the stream of later changes.
pub async fn connect(
    poll_interval: Duration,
) -> color_eyre::Result<(Vec<Player>, mpsc::UnboundedReceiver<PlayerEvent>)> {
    #[cfg(target_os = "linux")]
    {
        watcher::spawn_watcher(poll_interval).await
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = poll_interval;
        Err(color_eyre::eyre::eyre!(
            "MPRIS players are only available on Linux"
        ))
    }
}

/// Events that turn the `old` snapshot into the `new` one.
///
/// Vanished players come first, then changes to players present in both
/// snapshots, then new players, each group in snapshot order. A status
/// change is reported before a metadata change of the same player.
pub fn diff_snapshots(old: &[Player], new: &[Player]) -> Vec<PlayerEvent> {
    let mut events: Vec<PlayerEvent> = old
        .iter()
        .filter(|o| !new.iter().any(|n| n.id == o.id))
        .map(|o| PlayerEvent::Vanished(o.id.clone()))
        .collect();

    let mut appeared = Vec::new();
    for player in new {
        match old.iter().find(|o| o.id == player.id) {
            Some(previous) => {
                if previous.status != player.status {
                    events.push(PlayerEvent::StatusChanged(player.id.clone(), player.status));
                }
                if previous.metadata != player.metadata {
                    events.push(PlayerEvent::MetadataChanged(
                        player.id.clone(),
                        player.metadata.clone(),
                    ));
                }
            }
            None => appeared.push(PlayerEvent::Appeared(player.clone())),
        }
    }

    events.extend(appeared);
    events
}
