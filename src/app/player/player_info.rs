use std::fmt;

/// Player name that reports advertisements through its track id
const SPOTIFY_PLAYER_NAME: &str = "spotify";

/// Marker Spotify puts into the track id of an advertisement
const AD_TRACK_ID_MARKER: &str = ":ad:";

/// Text shown while Spotify plays an advertisement
const ADVERTISEMENT_TEXT: &str = "Advertisement";

/// Unique handle of a player: the MPRIS bus name with the
/// `org.mpris.MediaPlayer2.` prefix removed, instance suffix included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Player name without the instance suffix (`chromium.instance42` -> `chromium`)
    pub fn player_name(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub artist: String,
    pub title: String,
    pub track_id: String,
}

impl Metadata {
    /// Build metadata from raw player fields. Multiple artists are joined
    /// with ", " and missing fields become empty strings.
    pub fn new(artists: &[&str], title: Option<&str>, track_id: Option<&str>) -> Self {
        let artist = artists
            .iter()
            .map(|a| sanitize_string(a))
            .filter(|a| !a.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            artist,
            title: title.map(sanitize_string).unwrap_or_default(),
            track_id: track_id.unwrap_or_default().to_string(),
        }
    }
}

/// Replace control and invisible characters with spaces so a single
/// output line can never be broken up by the player's metadata.
pub fn sanitize_string(s: &str) -> String {
    let result: String = s
        .chars()
        .map(|c| match c {
            '\u{0000}'..='\u{001F}'
            | '\u{007F}'..='\u{009F}'
            | '\u{00AD}'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{2060}'
            | '\u{FEFF}' => ' ',
            _ => c,
        })
        .collect();
    if result != s {
        log::debug!("Sanitized string: {:?} -> {:?}", s, result);
    }
    result
}

/// Cut `text` down to at most `width` characters.
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Locally cached view of one media player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub status: PlaybackStatus,
    pub metadata: Metadata,
}

impl Player {
    pub fn new(id: PlayerId, status: PlaybackStatus, metadata: Metadata) -> Self {
        let name = id.player_name().to_string();
        Self {
            id,
            name,
            status,
            metadata,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Text to show for this player. Empty means "nothing to show".
    pub fn display_text(&self) -> String {
        let Metadata {
            artist,
            title,
            track_id,
        } = &self.metadata;

        if self.name == SPOTIFY_PLAYER_NAME && track_id.contains(AD_TRACK_ID_MARKER) {
            ADVERTISEMENT_TEXT.to_string()
        } else if !artist.is_empty() && !title.is_empty() {
            format!("{} - {}", title, artist)
        } else {
            title.clone()
        }
    }

    /// CSS class tag for the bar, e.g. `spotify-playing`
    pub fn class_tag(&self) -> String {
        format!("{}-{}", self.name, self.status).to_lowercase()
    }
}
