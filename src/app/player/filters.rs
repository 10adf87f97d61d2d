use color_eyre::eyre::bail;

/// Which players may be shown at all. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Only this player is ever shown
    pub selected: Option<String>,
    /// These players are never shown
    pub excluded: Vec<String>,
}

impl Filters {
    pub fn new(selected: Option<String>, excluded: Vec<String>) -> Self {
        Self { selected, excluded }
    }

    /// Parse a comma-separated exclusion list such as `"firefox,chromium"`.
    pub fn parse_excluded(list: &str) -> color_eyre::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in list.split(',') {
            let name = entry.trim();
            if name.is_empty() {
                bail!("Invalid exclude list '{}': empty player name", list);
            }
            names.push(name.to_string());
        }
        Ok(names)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|e| e == name)
    }

    /// Whether a player with this name should be registered.
    pub fn admits(&self, name: &str) -> bool {
        if self.is_excluded(name) {
            return false;
        }
        match self.selected {
            Some(ref selected) => selected == name,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_excluded() {
        let names = Filters::parse_excluded("firefox, chromium ,mpv").unwrap();
        assert_eq!(names, vec!["firefox", "chromium", "mpv"]);
    }

    #[test]
    fn test_parse_excluded_rejects_empty_entries() {
        assert!(Filters::parse_excluded("firefox,,mpv").is_err());
        assert!(Filters::parse_excluded(",").is_err());
        assert!(Filters::parse_excluded("").is_err());
        assert!(Filters::parse_excluded("firefox,").is_err());
    }

    #[test]
    fn test_default_admits_everything() {
        let filters = Filters::default();
        assert!(filters.admits("spotify"));
        assert!(filters.admits("mpv"));
    }

    #[test]
    fn test_excluded_player() {
        let filters = Filters::new(None, vec!["firefox".to_string()]);
        assert!(!filters.admits("firefox"));
        assert!(filters.admits("spotify"));
    }

    #[test]
    fn test_selected_player_only() {
        let filters = Filters::new(Some("spotify".to_string()), Vec::new());
        assert!(filters.admits("spotify"));
        assert!(!filters.admits("mpv"));
    }

    #[test]
    fn test_exclusion_wins_over_selection() {
        let filters = Filters::new(Some("spotify".to_string()), vec!["spotify".to_string()]);
        assert!(!filters.admits("spotify"));
    }
}
