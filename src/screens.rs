//! Per-screen state that only lives while its screen is shown.

use crate::clock::format_elapsed;
use crate::ticker::Ticker;
use std::time::{Duration, Instant};

pub const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// The in-call screen. Created on entry to Connected and dropped on exit,
/// which also cancels its one-second ticker.
#[derive(Debug)]
pub struct ConnectedScreen {
    entered: Instant,
    elapsed_secs: u64,
    ticker: Ticker,
    muted: bool,
    speaker: bool,
}

impl ConnectedScreen {
    pub fn enter(now: Instant) -> Self {
        Self {
            entered: now,
            elapsed_secs: 0,
            ticker: Ticker::new(ELAPSED_TICK, now),
            muted: false,
            speaker: false,
        }
    }

    /// Advance the call timer. Returns true when the display changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.ticker.due(now);
        if fired == 0 {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(u64::from(fired));
        true
    }

    pub fn next_tick(&self) -> Instant {
        self.ticker.next_due()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn elapsed_text(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn toggle_speaker(&mut self) -> bool {
        self.speaker = !self.speaker;
        self.speaker
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_speaker(&self) -> bool {
        self.speaker
    }

    /// Bar heights (0..=1) for the level visualizer. Purely decorative: a
    /// deterministic wave keyed on time since the call connected.
    pub fn visualizer_levels(&self, now: Instant, bars: usize) -> Vec<f32> {
        let phase = now.saturating_duration_since(self.entered).as_secs_f32();
        (0..bars)
            .map(|bar| {
                let x = phase * 6.0 + bar as f32 * 0.9;
                let level = 0.55 + 0.3 * x.sin() + 0.15 * (x * 2.3).cos();
                if self.muted {
                    0.1
                } else {
                    level.clamp(0.1, 1.0)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let screen = ConnectedScreen::enter(Instant::now());
        assert_eq!(screen.elapsed_secs(), 0);
        assert_eq!(screen.elapsed_text(), "00:00");
    }

    #[test]
    fn counts_whole_seconds() {
        let start = Instant::now();
        let mut screen = ConnectedScreen::enter(start);

        assert!(!screen.tick(start + Duration::from_millis(999)));
        assert!(screen.tick(start + Duration::from_secs(1)));
        assert_eq!(screen.elapsed_secs(), 1);

        assert!(screen.tick(start + Duration::from_secs(65)));
        assert_eq!(screen.elapsed_text(), "01:05");
        assert_eq!(screen.next_tick(), start + Duration::from_secs(66));
    }

    #[test]
    fn toggles_are_independent() {
        let mut screen = ConnectedScreen::enter(Instant::now());
        assert!(screen.toggle_mute());
        assert!(screen.is_muted());
        assert!(!screen.is_speaker());
        assert!(screen.toggle_speaker());
        assert!(!screen.toggle_mute());
        assert!(screen.is_speaker());
    }

    #[test]
    fn visualizer_stays_in_range_and_flattens_when_muted() {
        let start = Instant::now();
        let mut screen = ConnectedScreen::enter(start);
        let levels = screen.visualizer_levels(start + Duration::from_millis(350), 12);
        assert_eq!(levels.len(), 12);
        assert!(levels.iter().all(|level| (0.1..=1.0).contains(level)));

        screen.toggle_mute();
        let muted = screen.visualizer_levels(start, 5);
        assert!(muted.iter().all(|level| (*level - 0.1).abs() < f32::EPSILON));
    }
}
