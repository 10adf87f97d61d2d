use std::time::Duration;

use tokio::time::Instant;

use crate::app::player::PlayerId;

/// Spacing appended to the text before it repeats
pub const SCROLL_GAP: &str = "     ";

/// Minimum number of times the text is repeated in the scroll buffer
const MIN_REPEATS: usize = 2;

/// Text repeated with a gap so that any window of `width` characters can
/// be read cyclically without special-casing the wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollBuffer {
    chars: Vec<char>,
    width: usize,
}

impl ScrollBuffer {
    pub fn new(text: &str, width: usize) -> Self {
        let unit: Vec<char> = text.chars().chain(SCROLL_GAP.chars()).collect();
        let repeats = MIN_REPEATS.max(width / unit.len() + 2);
        let chars = unit.repeat(repeats);
        Self { chars, width }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Exactly `width` characters starting at `cursor`, wrapping around
    pub fn window(&self, cursor: usize) -> String {
        (0..self.width)
            .map(|offset| self.chars[(cursor + offset) % self.chars.len()])
            .collect()
    }

    #[cfg(test)]
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Pending scroll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    deadline: Instant,
}

impl TimerHandle {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Result of a scroll tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Frame to write; the next tick is armed
    Render(String),
    /// Nothing to show anymore; the timer was dropped
    Cancelled,
}

#[derive(Debug)]
struct Scroll {
    buffer: ScrollBuffer,
    cursor: usize,
    owner: Option<PlayerId>,
}

/// Owns the scrolling text and the one scroll timer.
#[derive(Debug)]
pub struct Animator {
    width: usize,
    interval: Duration,
    scroll: Option<Scroll>,
    timer: Option<TimerHandle>,
}

impl Animator {
    pub fn new(width: usize, interval: Duration) -> Self {
        Self {
            width,
            interval,
            scroll: None,
            timer: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Start scrolling `text` and return the first frame.
    ///
    /// Any pending tick is cancelled first. Empty text stops the animation
    /// and returns `None`, which callers turn into a cleared bar.
    pub fn start(&mut self, text: &str, owner: Option<PlayerId>) -> Option<String> {
        self.timer = None;
        if text.is_empty() {
            self.stop();
            return None;
        }

        self.scroll = Some(Scroll {
            buffer: ScrollBuffer::new(text, self.width),
            cursor: 0,
            owner,
        });
        let frame = self.advance();
        self.rearm();
        frame
    }

    /// Cancel the pending tick and forget the text. Writes nothing.
    pub fn stop(&mut self) {
        self.timer = None;
        self.scroll = None;
    }

    /// Run one scroll step.
    ///
    /// `top_playing` is the highest-priority playing player right now; a
    /// scroll owned by any other player is stale and cancels itself.
    pub fn tick(&mut self, top_playing: Option<&PlayerId>) -> Tick {
        let stale = match self.scroll {
            None => true,
            Some(ref scroll) => scroll
                .owner
                .as_ref()
                .is_some_and(|owner| Some(owner) != top_playing),
        };
        if stale {
            log::debug!("Scroll tick is stale, cancelling timer");
            self.timer = None;
            return Tick::Cancelled;
        }

        match self.advance() {
            Some(frame) => {
                self.rearm();
                Tick::Render(frame)
            }
            None => {
                self.timer = None;
                Tick::Cancelled
            }
        }
    }

    /// Render the window at the cursor and move the cursor one step.
    fn advance(&mut self) -> Option<String> {
        let scroll = self.scroll.as_mut()?;
        let frame = scroll.buffer.window(scroll.cursor);
        scroll.cursor = (scroll.cursor + 1) % scroll.buffer.len();
        Some(frame)
    }

    /// Arm the next tick one interval from now, replacing any pending one.
    fn rearm(&mut self) {
        self.timer = Some(TimerHandle {
            deadline: Instant::now() + self.interval,
        });
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.deadline())
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.scroll.is_some()
    }

    pub fn owner(&self) -> Option<&PlayerId> {
        self.scroll.as_ref().and_then(|s| s.owner.as_ref())
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.scroll.as_ref().map_or(0, |s| s.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(300);

    #[test]
    fn test_buffer_example() {
        let buffer = ScrollBuffer::new("AB", 10);
        assert_eq!(buffer.as_string(), "AB     AB     AB     ");
        assert_eq!(buffer.len(), 21);
        assert_eq!(buffer.window(0), "AB     AB ");
        assert_eq!(buffer.window(1), "B     AB  ");
    }

    #[test]
    fn test_buffer_long_text_repeats_twice() {
        let text = "x".repeat(100);
        let buffer = ScrollBuffer::new(&text, 40);
        assert_eq!(buffer.len(), 2 * 105);
    }

    #[test]
    fn test_buffer_always_covers_width() {
        for width in [1, 5, 10, 39, 40, 41, 80] {
            for text in ["a", "ab", "hello world", "Roygbiv - Boards of Canada"] {
                let buffer = ScrollBuffer::new(text, width);
                assert!(buffer.len() >= width, "{text:?} at width {width}");
                for cursor in 0..buffer.len() {
                    assert_eq!(buffer.window(cursor).chars().count(), width);
                }
            }
        }
    }

    #[test]
    fn test_buffer_counts_chars_not_bytes() {
        let buffer = ScrollBuffer::new("日本", 4);
        assert_eq!(buffer.window(0), "日本  ");
    }

    #[test]
    fn test_start_renders_and_arms() {
        let mut animator = Animator::new(10, INTERVAL);
        let frame = animator.start("AB", None);
        assert_eq!(frame.as_deref(), Some("AB     AB "));
        assert_eq!(animator.cursor(), 1);
        assert!(animator.is_armed());
        assert_eq!(animator.owner(), None);

        assert_eq!(animator.tick(None), Tick::Render("B     AB  ".to_string()));
        assert_eq!(animator.cursor(), 2);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut animator = Animator::new(10, INTERVAL);
        animator.start("AB", None);
        for _ in 0..20 {
            animator.tick(None);
        }
        assert_eq!(animator.cursor(), 0);
        assert_eq!(animator.tick(None), Tick::Render("AB     AB ".to_string()));
    }

    #[test]
    fn test_restart_resets_cursor() {
        let mut animator = Animator::new(10, INTERVAL);
        let owner = Some(PlayerId::new("mpv"));
        let first = animator.start("AB", owner.clone());
        animator.tick(owner.as_ref());
        animator.tick(owner.as_ref());
        let second = animator.start("AB", owner.clone());
        assert_eq!(first, second);
        assert_eq!(animator.cursor(), 1);
        assert!(animator.is_armed());
    }

    #[test]
    fn test_empty_text_stops() {
        let mut animator = Animator::new(10, INTERVAL);
        animator.start("AB", None);
        assert_eq!(animator.start("", None), None);
        assert!(!animator.is_active());
        assert!(!animator.is_armed());
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut animator = Animator::new(10, INTERVAL);
        animator.start("AB", Some(PlayerId::new("mpv")));
        animator.stop();
        assert!(!animator.is_active());
        assert!(!animator.is_armed());
        assert_eq!(animator.owner(), None);
        assert_eq!(animator.cursor(), 0);
        assert_eq!(animator.tick(None), Tick::Cancelled);
    }

    #[test]
    fn test_tick_cancels_when_owner_lost_priority() {
        let mut animator = Animator::new(10, INTERVAL);
        let mpv = PlayerId::new("mpv");
        let spotify = PlayerId::new("spotify");
        animator.start("AB", Some(mpv.clone()));

        assert!(matches!(animator.tick(Some(&mpv)), Tick::Render(_)));
        assert_eq!(animator.tick(Some(&spotify)), Tick::Cancelled);
        assert!(!animator.is_armed());

        let mut animator = Animator::new(10, INTERVAL);
        animator.start("AB", Some(mpv));
        assert_eq!(animator.tick(None), Tick::Cancelled);
    }

    #[test]
    fn test_unowned_scroll_ignores_priority() {
        let mut animator = Animator::new(10, INTERVAL);
        animator.start("idle", None);
        let spotify = PlayerId::new("spotify");
        assert!(matches!(animator.tick(Some(&spotify)), Tick::Render(_)));
        assert!(animator.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_moves_deadline() {
        let mut animator = Animator::new(10, INTERVAL);
        animator.start("AB", None);
        let first = animator.deadline().unwrap();
        tokio::time::advance(INTERVAL).await;
        animator.tick(None);
        assert_eq!(animator.deadline().unwrap(), first + INTERVAL);
    }
}
