// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded durations for rule pauses and manual watering.
//!
//! Light rules can be paused for up to a day, pump rules for up to two
//! hours. Out-of-range user input is clamped rather than rejected, so a
//! duration value that exists is always valid for its class.

use std::fmt;
use std::time::Duration;

use crate::error::ValueError;
use crate::types::ActuatorClass;

/// Minimum pause duration for either class (1 minute).
const MIN_MINUTES: u16 = 1;

/// Maximum light pause duration (24 hours).
const LIGHT_MAX_MINUTES: u16 = 1440;

/// Maximum pump pause duration (2 hours).
const PUMP_MAX_MINUTES: u16 = 120;

/// A pause/override duration bounded for one actuator class.
///
/// Valid range: 1-1440 minutes for [`ActuatorClass::Light`], 1-120
/// minutes for [`ActuatorClass::Pump`]. For manual watering the same
/// value doubles as the pump run time (the controller schedules the
/// auto-off).
///
/// # Examples
///
/// ```
/// use gardor_lib::types::{ActuatorClass, OverrideDuration};
///
/// let d = OverrideDuration::new(ActuatorClass::Light, 90).unwrap();
/// assert_eq!(d.minutes(), 90);
///
/// // Out-of-range input is clamped, never rejected.
/// let d = OverrideDuration::clamped(ActuatorClass::Pump, 500);
/// assert_eq!(d.minutes(), 120);
/// let d = OverrideDuration::clamped(ActuatorClass::Pump, -3);
/// assert_eq!(d.minutes(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OverrideDuration {
    class: ActuatorClass,
    minutes: u16,
}

impl OverrideDuration {
    /// Returns the maximum duration in minutes for the given class.
    #[must_use]
    pub const fn max_minutes(class: ActuatorClass) -> u16 {
        match class {
            ActuatorClass::Light => LIGHT_MAX_MINUTES,
            ActuatorClass::Pump => PUMP_MAX_MINUTES,
        }
    }

    /// Creates a new duration, validating the class-specific bounds.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `minutes` is zero or above the
    /// class maximum.
    pub fn new(class: ActuatorClass, minutes: u16) -> Result<Self, ValueError> {
        let max = Self::max_minutes(class);
        if minutes < MIN_MINUTES || minutes > max {
            return Err(ValueError::OutOfRange {
                min: MIN_MINUTES,
                max,
                actual: minutes,
            });
        }
        Ok(Self { class, minutes })
    }

    /// Creates a duration, clamping into the class-specific bounds.
    ///
    /// Zero and negative values become 1 minute; values above the class
    /// maximum become the maximum.
    #[must_use]
    pub fn clamped(class: ActuatorClass, minutes: i64) -> Self {
        let max = i64::from(Self::max_minutes(class));
        let clamped = minutes.clamp(i64::from(MIN_MINUTES), max);
        // Safe: clamped is within [1, 1440]
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self {
            class,
            minutes: clamped as u16,
        }
    }

    /// Parses free-form user input, falling back to a default.
    ///
    /// Numeric input is clamped into range; non-numeric input yields
    /// `fallback` unchanged. The action is never rejected over a bad
    /// duration string.
    ///
    /// # Examples
    ///
    /// ```
    /// use gardor_lib::types::{ActuatorClass, OverrideDuration};
    ///
    /// let last = OverrideDuration::new(ActuatorClass::Pump, 10).unwrap();
    /// assert_eq!(OverrideDuration::parse_or(ActuatorClass::Pump, "25", last).minutes(), 25);
    /// assert_eq!(OverrideDuration::parse_or(ActuatorClass::Pump, "900", last).minutes(), 120);
    /// assert_eq!(OverrideDuration::parse_or(ActuatorClass::Pump, "soon", last).minutes(), 10);
    /// ```
    #[must_use]
    pub fn parse_or(class: ActuatorClass, input: &str, fallback: Self) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map_or(fallback, |minutes| Self::clamped(class, minutes))
    }

    /// Returns the actuator class this duration is bounded for.
    #[must_use]
    pub const fn class(&self) -> ActuatorClass {
        self.class
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }

    /// Returns the duration as a [`std::time::Duration`].
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_secs(self.minutes as u64 * 60)
    }
}

impl fmt::Display for OverrideDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_specific_bounds() {
        assert!(OverrideDuration::new(ActuatorClass::Light, 1440).is_ok());
        assert!(OverrideDuration::new(ActuatorClass::Light, 1441).is_err());
        assert!(OverrideDuration::new(ActuatorClass::Pump, 120).is_ok());
        assert!(OverrideDuration::new(ActuatorClass::Pump, 121).is_err());
        assert!(OverrideDuration::new(ActuatorClass::Pump, 0).is_err());
    }

    #[test]
    fn clamped_never_fails() {
        assert_eq!(OverrideDuration::clamped(ActuatorClass::Light, 0).minutes(), 1);
        assert_eq!(
            OverrideDuration::clamped(ActuatorClass::Light, 100_000).minutes(),
            1440
        );
        assert_eq!(OverrideDuration::clamped(ActuatorClass::Pump, -7).minutes(), 1);
        assert_eq!(OverrideDuration::clamped(ActuatorClass::Pump, 60).minutes(), 60);
    }

    #[test]
    fn parse_or_clamps_numeric_input() {
        let fallback = OverrideDuration::new(ActuatorClass::Light, 30).unwrap();
        assert_eq!(
            OverrideDuration::parse_or(ActuatorClass::Light, " 45 ", fallback).minutes(),
            45
        );
        assert_eq!(
            OverrideDuration::parse_or(ActuatorClass::Light, "5000", fallback).minutes(),
            1440
        );
        assert_eq!(
            OverrideDuration::parse_or(ActuatorClass::Light, "-2", fallback).minutes(),
            1
        );
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        let fallback = OverrideDuration::new(ActuatorClass::Pump, 15).unwrap();
        for input in ["", "abc", "1.5", "ten"] {
            assert_eq!(
                OverrideDuration::parse_or(ActuatorClass::Pump, input, fallback),
                fallback,
                "input {input:?}"
            );
        }
    }

    #[test]
    fn as_duration() {
        let d = OverrideDuration::new(ActuatorClass::Pump, 15).unwrap();
        assert_eq!(d.as_duration(), Duration::from_secs(900));
    }

    #[test]
    fn display() {
        let d = OverrideDuration::new(ActuatorClass::Light, 90).unwrap();
        assert_eq!(d.to_string(), "90m");
    }
}
