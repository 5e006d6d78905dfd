//! Session clock: real wall-clock time or a simulated override.
//!
//! Lets a demo or a tester move the session to any time of day without
//! touching the system clock. The poll core never reads this itself; the
//! session passes `now()` into every operation.

use std::str::FromStr;

use jiff::Zoned;
use jiff::civil::DateTime;

/// Where the session's "now" comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionClock {
    /// Local wall-clock time.
    #[default]
    Real,

    /// A fixed, manually chosen instant.
    Simulated(DateTime),
}

impl SessionClock {
    #[must_use]
    pub fn now(&self) -> DateTime {
        match self {
            Self::Real => Zoned::now().datetime(),
            Self::Simulated(at) => *at,
        }
    }

    /// Moves to `hour:minute` on the current date, seconds zeroed.
    ///
    /// # Errors
    ///
    /// Fails when `hour:minute` is not a valid time of day. The clock is
    /// left unchanged.
    pub fn simulate(&mut self, hour: i8, minute: i8) -> Result<(), jiff::Error> {
        let at = self
            .now()
            .with()
            .hour(hour)
            .minute(minute)
            .second(0)
            .subsec_nanosecond(0)
            .build()?;
        *self = Self::Simulated(at);
        Ok(())
    }

    /// Back to real time.
    pub fn reset(&mut self) {
        *self = Self::Real;
    }

    #[must_use]
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }
}

/// Named times for quickly moving through the default window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePreset {
    /// 08:00, before the poll opens.
    Early,
    /// 09:00, mid-window.
    Open,
    /// 10:25, just before close.
    Ending,
    /// 11:00, after close.
    Closed,
}

impl TimePreset {
    #[must_use]
    pub fn hour_minute(self) -> (i8, i8) {
        match self {
            Self::Early => (8, 0),
            Self::Open => (9, 0),
            Self::Ending => (10, 25),
            Self::Closed => (11, 0),
        }
    }
}

impl FromStr for TimePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early" => Ok(Self::Early),
            "open" => Ok(Self::Open),
            "ending" => Ok(Self::Ending),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown time preset '{other}'")),
        }
    }
}

/// Parses `HH:MM` into an hour and minute.
///
/// # Errors
///
/// Returns a message naming the input when it is not a time of day.
pub fn parse_hhmm(s: &str) -> Result<(i8, i8), String> {
    let time: jiff::civil::Time = s
        .parse()
        .map_err(|e| format!("invalid time '{s}' (expected HH:MM): {e}"))?;
    Ok((time.hour(), time.minute()))
}
