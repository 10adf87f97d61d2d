use std::io::{self, Write};

use serde::Serialize;

use crate::app::player::Player;

/// Class and alt tag used when no player is attributed
pub const NO_PLAYER: &str = "no-player";

/// One line of the bar protocol
#[derive(Debug, Serialize)]
struct Line<'a> {
    text: &'a str,
    class: String,
    alt: &'a str,
}

/// Writes bar updates as one JSON object per line.
///
/// Every write is flushed right away; the bar reads line by line.
pub struct OutputSink<W: Write> {
    writer: W,
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn emit(&mut self, text: &str, owner: Option<&Player>) -> io::Result<()> {
        let line = Line {
            text,
            class: owner.map_or_else(|| NO_PLAYER.to_string(), Player::class_tag),
            alt: owner.map_or(NO_PLAYER, |p| p.name.as_str()),
        };
        log::trace!("Writing output: {}", text);
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Empty line, which clears the bar
    pub fn emit_blank(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}
