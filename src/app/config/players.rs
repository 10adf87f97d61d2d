use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayersConfig {
    /// Only show this player
    #[serde(default)]
    pub selected: Option<String>,
    /// Never show these players
    #[serde(default)]
    pub excluded: Vec<String>,
}
