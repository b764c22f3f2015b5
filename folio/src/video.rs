//! Showcase video player state and keyboard controls.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;

pub const SEEK_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct VideoPlayer {
    duration: Duration,
    position: Duration,
    paused: bool,
    muted: bool,
}

impl VideoPlayer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
            paused: true,
            muted: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play from the start again once the end was reached.
    pub fn toggle_play(&mut self) {
        if self.paused && self.position >= self.duration {
            self.position = Duration::ZERO;
        }
        self.paused = !self.paused;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn seek_back(&mut self) {
        self.position = self.position.saturating_sub(SEEK_STEP);
    }

    pub fn seek_forward(&mut self) {
        self.position = (self.position + SEEK_STEP).min(self.duration);
    }

    /// Move the playback clock. Pauses at the end.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.paused || elapsed.is_zero() {
            return false;
        }
        self.position = (self.position + elapsed).min(self.duration);
        if self.position >= self.duration {
            self.paused = true;
        }
        true
    }

    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.position.as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Keyboard controls; only called while the player is fully in view.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_play(),
            KeyCode::Left => self.seek_back(),
            KeyCode::Right => self.seek_forward(),
            KeyCode::Char('m') => self.toggle_mute(),
            _ => return false,
        }
        true
    }
}

/// `m:ss` clock text.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut video = VideoPlayer::new(Duration::from_secs(12));
        video.seek_back();
        assert_eq!(video.position(), Duration::ZERO);

        video.seek_forward();
        video.seek_forward();
        video.seek_forward();
        assert_eq!(video.position(), Duration::from_secs(12));
    }

    #[test]
    fn test_clock_only_runs_while_playing() {
        let mut video = VideoPlayer::new(Duration::from_secs(60));
        assert!(!video.advance(Duration::from_secs(1)));

        video.toggle_play();
        video.advance(Duration::from_millis(1500));
        assert_eq!(video.position(), Duration::from_millis(1500));
    }

    #[test]
    fn test_playback_stops_at_end_and_restarts() {
        let mut video = VideoPlayer::new(Duration::from_secs(3));
        video.toggle_play();
        video.advance(Duration::from_secs(10));
        assert!(video.is_paused());
        assert_eq!(video.progress(), 1.0);

        video.toggle_play();
        assert!(!video.is_paused());
        assert_eq!(video.position(), Duration::ZERO);
    }

    #[test]
    fn test_keys() {
        let mut video = VideoPlayer::new(Duration::from_secs(30));
        assert!(video.handle_key(key(KeyCode::Char(' '))));
        assert!(!video.is_paused());
        assert!(video.handle_key(key(KeyCode::Char('m'))));
        assert!(video.is_muted());
        assert!(video.handle_key(key(KeyCode::Right)));
        assert_eq!(video.position(), SEEK_STEP);
        assert!(!video.handle_key(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_secs(184)), "3:04");
        assert_eq!(format_clock(Duration::ZERO), "0:00");
    }
}
