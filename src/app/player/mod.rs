pub mod filters;
pub mod player_info;
pub mod registry;

// Convenience re-exports
pub use filters::Filters;
pub use player_info::{Metadata, PlaybackStatus, Player, PlayerId, truncate};
pub use registry::PlayerRegistry;
