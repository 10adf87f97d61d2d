use super::{Player, PlayerId};

/// The players currently being tracked, in registration order.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. A player that is already known keeps its
    /// position and has its cached state replaced.
    pub fn register(&mut self, player: Player) {
        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
    }

    pub fn remove(&mut self, id: &PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| &p.id == id)?;
        Some(self.players.remove(index))
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// The most recently registered player that is playing.
    pub fn first_playing(&self) -> Option<&Player> {
        self.players.iter().rev().find(|p| p.is_playing())
    }

    /// The player that should be on the bar: the most recently registered
    /// playing player, falling back to the first registered one.
    pub fn most_important(&self) -> Option<&Player> {
        self.first_playing().or_else(|| self.players.first())
    }

    #[cfg(test)]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
