use crate::app::player::{Metadata, PlaybackStatus, Player, PlayerId};

/// Lifecycle and property changes reported by the player source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Appeared(Player),
    Vanished(PlayerId),
    StatusChanged(PlayerId, PlaybackStatus),
    MetadataChanged(PlayerId, Metadata),
}
