// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-clock time of day in the controller's timezone.
//!
//! Rule times are exchanged with the controller as `"HH:MM"` strings in
//! the device's own fixed timezone. [`ClockTime`] stores such a time as
//! minutes since midnight, which makes the range arithmetic in
//! [`schedule`](crate::schedule) straightforward.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::error::ValueError;

/// Minutes in a day.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day (`HH:MM`), stored as minutes since midnight.
///
/// The value is always interpreted in the controller's timezone, never
/// the client machine's. Use [`ClockTime::at`] to project an absolute
/// instant into the controller's wall clock.
///
/// # Examples
///
/// ```
/// use gardor_lib::types::ClockTime;
///
/// let t: ClockTime = "08:30".parse().unwrap();
/// assert_eq!(t.hour(), 8);
/// assert_eq!(t.minute(), 30);
/// assert_eq!(t.minutes_since_midnight(), 510);
/// assert_eq!(t.to_string(), "08:30");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a clock time from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidClockTime` if `hour > 23` or
    /// `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValueError> {
        if hour > 23 || minute > 59 {
            return Err(ValueError::InvalidClockTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Creates a clock time from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `minutes >= 1440`.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValueError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: MINUTES_PER_DAY - 1,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    /// Projects an absolute instant into the controller's wall clock.
    ///
    /// The instant is converted to the given fixed offset (the device's
    /// timezone) before taking the time of day, so the result is stable
    /// no matter where the client machine runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{DateTime, FixedOffset, Utc};
    /// use gardor_lib::types::ClockTime;
    ///
    /// let instant: DateTime<Utc> = "2026-03-10T23:30:00Z".parse().unwrap();
    /// let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    /// // 23:30 UTC is 01:30 the next day at UTC+2.
    /// assert_eq!(ClockTime::at(instant, tz).to_string(), "01:30");
    /// ```
    #[must_use]
    pub fn at(instant: DateTime<Utc>, timezone: FixedOffset) -> Self {
        let local = instant.with_timezone(&timezone);
        // Safe: hour < 24 and minute < 60, so the sum fits in u16
        #[allow(clippy::cast_possible_truncation)]
        Self((local.hour() * 60 + local.minute()) as u16)
    }

    /// Returns minutes since midnight (0-1439).
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    /// Returns the hour (0-23).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Returns the minute (0-59).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::InvalidClockTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
