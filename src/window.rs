//! Poll window: the recurring daily interval in which votes are accepted.
//!
//! The window is defined by two time-of-day bounds, both inclusive, counted
//! in minutes since midnight. The date is ignored entirely, so 09:00 on any
//! day falls inside the default window. No timezone normalization happens:
//! the wall-clock components of `now` are used as given.

use std::fmt;

use jiff::civil::{DateTime, Time};
use serde::{Deserialize, Serialize};

/// Minutes in a day. Bounds must be strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// 08:30.
pub const DEFAULT_OPEN_AT: u16 = 8 * 60 + 30;

/// 10:30.
pub const DEFAULT_CLOSE_AT: u16 = 10 * 60 + 30;

/// Errors from building a window out of bad bounds.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("window bound {0} is not a time of day (must be below 1440)")]
    OutOfRange(u16),

    #[error("window opens at {} but closes earlier at {}", hhmm(*.open_at), hhmm(*.close_at))]
    Inverted { open_at: u16, close_at: u16 },
}

/// Inclusive time-of-day bounds, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollWindowConfig {
    open_at: u16,
    close_at: u16,
}

impl PollWindowConfig {
    /// Builds a window, rejecting bounds outside the day or in reverse order.
    ///
    /// Windows that wrap past midnight are not supported.
    ///
    /// # Errors
    ///
    /// [`WindowError::OutOfRange`] when a bound is 1440 or more, and
    /// [`WindowError::Inverted`] when `open_at` is after `close_at`.
    pub fn new(open_at: u16, close_at: u16) -> Result<Self, WindowError> {
        for bound in [open_at, close_at] {
            if bound >= MINUTES_PER_DAY {
                return Err(WindowError::OutOfRange(bound));
            }
        }
        if open_at > close_at {
            return Err(WindowError::Inverted { open_at, close_at });
        }
        Ok(Self { open_at, close_at })
    }

    /// Builds a window from wall-clock times. Seconds are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Inverted`] when `open` is after `close`.
    pub fn from_times(open: Time, close: Time) -> Result<Self, WindowError> {
        Self::new(time_minutes(open), time_minutes(close))
    }

    #[must_use]
    pub fn open_at(&self) -> u16 {
        self.open_at
    }

    #[must_use]
    pub fn close_at(&self) -> u16 {
        self.close_at
    }
}

impl Default for PollWindowConfig {
    fn default() -> Self {
        Self {
            open_at: DEFAULT_OPEN_AT,
            close_at: DEFAULT_CLOSE_AT,
        }
    }
}

impl fmt::Display for PollWindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", hhmm(self.open_at), hhmm(self.close_at))
    }
}

/// Minutes since midnight of `now`'s wall-clock time.
#[must_use]
pub fn minutes_since_midnight(now: DateTime) -> u16 {
    time_minutes(now.time())
}

/// Whether the poll accepts votes at `now`.
#[must_use]
pub fn is_open(now: DateTime, config: &PollWindowConfig) -> bool {
    let minutes = minutes_since_midnight(now);
    config.open_at <= minutes && minutes <= config.close_at
}

/// Formats minutes since midnight as `HH:MM`.
#[must_use]
pub fn hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn time_minutes(time: Time) -> u16 {
    // Civil hours and minutes are never negative.
    let hour = u16::from(time.hour().unsigned_abs());
    let minute = u16::from(time.minute().unsigned_abs());
    hour * 60 + minute
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::{date, time};

    fn at(minutes: u16) -> DateTime {
        let hour = i8::try_from(minutes / 60).unwrap();
        let minute = i8::try_from(minutes % 60).unwrap();
        date(2024, 6, 3).at(hour, minute, 0, 0)
    }

    #[test]
    fn default_window_is_0830_to_1030() {
        let config = PollWindowConfig::default();
        assert_eq!(config.open_at(), 510);
        assert_eq!(config.close_at(), 630);
        assert_eq!(config.to_string(), "08:30 - 10:30");
    }

    #[test]
    fn bounds_are_inclusive() {
        let config = PollWindowConfig::default();
        assert!(!is_open(at(509), &config));
        assert!(is_open(at(510), &config));
        assert!(is_open(at(630), &config));
        assert!(!is_open(at(631), &config));
    }

    #[test]
    fn open_exactly_within_bounds_for_every_minute_of_the_day() {
        let config = PollWindowConfig::default();
        for minutes in 0..MINUTES_PER_DAY {
            let expected = (510..=630).contains(&minutes);
            assert_eq!(is_open(at(minutes), &config), expected, "minute {minutes}");
        }
    }

    #[test]
    fn date_is_ignored() {
        let config = PollWindowConfig::default();
        assert!(is_open(date(1999, 12, 31).at(9, 0, 0, 0), &config));
        assert!(is_open(date(2031, 2, 28).at(9, 0, 0, 0), &config));
    }

    #[test]
    fn seconds_do_not_push_past_close() {
        let config = PollWindowConfig::default();
        assert!(is_open(date(2024, 6, 3).at(10, 30, 59, 999), &config));
    }

    #[test]
    fn rejects_out_of_range_bound() {
        assert_eq!(
            PollWindowConfig::new(0, 1440).unwrap_err(),
            WindowError::OutOfRange(1440)
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = PollWindowConfig::new(700, 600).unwrap_err();
        assert_eq!(
            err.to_string(),
            "window opens at 11:40 but closes earlier at 10:00"
        );
    }

    #[test]
    fn single_minute_window() {
        let config = PollWindowConfig::new(720, 720).unwrap();
        assert!(is_open(at(720), &config));
        assert!(!is_open(at(721), &config));
    }

    #[test]
    fn builds_from_times() {
        let config = PollWindowConfig::from_times(time(12, 0, 0, 0), time(13, 15, 30, 0)).unwrap();
        assert_eq!(config.open_at(), 720);
        assert_eq!(config.close_at(), 795);
    }
}
