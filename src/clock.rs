//! Status-bar clock and call timer formatting.

use crate::ticker::Ticker;
use chrono::{Local, NaiveTime, Timelike};
use std::time::{Duration, Instant};

/// The status clock is polled, not exact; it may lag by up to this much.
pub const CLOCK_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// 12-hour `H:MM`: no leading zero on the hour, no AM/PM, no seconds.
/// Hours 0 and 12 both read `12`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour}:{minute:02}")
}

pub fn format_clock_time<T: Timelike>(time: &T) -> String {
    format_clock(time.hour(), time.minute())
}

/// `MM:SS` call timer. Minutes are not wrapped into hours, so an hour-long
/// call reads `60:00`.
pub fn format_elapsed(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Source of wall-clock time of day; injected so tests can pin it.
pub trait WallClock {
    fn time_of_day(&self) -> NaiveTime;
}

/// The machine's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Status-bar text, recomputed at start and then every `CLOCK_REFRESH_INTERVAL`.
pub struct StatusClock {
    source: Box<dyn WallClock>,
    ticker: Ticker,
    text: String,
}

impl StatusClock {
    pub fn new(source: Box<dyn WallClock>, now: Instant) -> Self {
        let text = format_clock_time(&source.time_of_day());
        Self {
            source,
            ticker: Ticker::new(CLOCK_REFRESH_INTERVAL, now),
            text,
        }
    }

    /// Returns true when the displayed text changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.ticker.due(now) == 0 {
            return false;
        }
        let text = format_clock_time(&self.source.time_of_day());
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn next_refresh(&self) -> Instant {
        self.ticker.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct PinnedClock(Rc<Cell<NaiveTime>>);

    impl WallClock for PinnedClock {
        fn time_of_day(&self) -> NaiveTime {
            self.0.get()
        }
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn midnight_and_noon_read_twelve() {
        assert_eq!(format_clock(0, 0), "12:00");
        assert_eq!(format_clock(12, 30), "12:30");
    }

    #[test]
    fn afternoon_hours_drop_to_twelve_hour() {
        assert_eq!(format_clock(13, 5), "1:05");
        assert_eq!(format_clock(23, 59), "11:59");
        assert_eq!(format_clock(9, 41), "9:41");
    }

    #[test]
    fn every_time_of_day_matches_the_display_shape() {
        for hour in 0..24 {
            for minute in 0..60 {
                let text = format_clock(hour, minute);
                let (h, m) = text.split_once(':').expect("colon");
                let h: u32 = h.parse().expect("hour digits");
                assert!((1..=12).contains(&h), "{text}");
                assert!(!text.starts_with('0'), "{text}");
                assert_eq!(m.len(), 2, "{text}");
                assert_eq!(m.parse::<u32>().expect("minute digits"), minute);
            }
        }
    }

    #[test]
    fn clock_time_uses_hour_and_minute_only() {
        let time = NaiveTime::from_hms_opt(18, 7, 59).expect("valid time");
        assert_eq!(format_clock_time(&time), "6:07");
    }

    #[test]
    fn elapsed_pads_both_fields() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(5), "00:05");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(5_999), "99:59");
    }

    #[test]
    fn elapsed_minutes_are_not_clamped() {
        assert_eq!(format_elapsed(6_000), "100:00");
    }

    #[test]
    fn status_clock_refreshes_on_the_interval() {
        let start = Instant::now();
        let time = Rc::new(Cell::new(hm(9, 41)));
        let mut clock = StatusClock::new(Box::new(PinnedClock(time.clone())), start);
        assert_eq!(clock.text(), "9:41");

        time.set(hm(9, 42));
        assert!(!clock.poll(start + Duration::from_secs(9)));
        assert_eq!(clock.text(), "9:41");

        assert!(clock.poll(start + CLOCK_REFRESH_INTERVAL));
        assert_eq!(clock.text(), "9:42");
        assert_eq!(clock.next_refresh(), start + CLOCK_REFRESH_INTERVAL * 2);
    }

    #[test]
    fn status_clock_reports_no_change_when_minute_is_the_same() {
        let start = Instant::now();
        let time = Rc::new(Cell::new(hm(21, 0)));
        let mut clock = StatusClock::new(Box::new(PinnedClock(time)), start);
        assert_eq!(clock.text(), "9:00");
        assert!(!clock.poll(start + CLOCK_REFRESH_INTERVAL));
    }
}
