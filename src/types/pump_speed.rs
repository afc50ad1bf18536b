// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pump speed type.

use std::fmt;

use crate::error::ValueError;

/// Irrigation pump speed as a percentage (0-100).
///
/// Manual watering always runs at [`PumpSpeed::FULL`]; lower speeds only
/// appear in actuator state reported by the controller.
///
/// # Examples
///
/// ```
/// use gardor_lib::types::PumpSpeed;
///
/// let speed = PumpSpeed::new(60).unwrap();
/// assert_eq!(speed.value(), 60);
/// assert_eq!(PumpSpeed::FULL.value(), 100);
/// assert!(PumpSpeed::new(120).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct PumpSpeed(u8);

impl PumpSpeed {
    /// Full speed (100%).
    pub const FULL: Self = Self(100);

    /// Creates a new pump speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the speed percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PumpSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for PumpSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PumpSpeed> for u8 {
    fn from(value: PumpSpeed) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_and_invalid_values() {
        assert_eq!(PumpSpeed::new(0).unwrap().value(), 0);
        assert_eq!(PumpSpeed::new(100).unwrap().value(), 100);
        assert!(PumpSpeed::new(101).is_err());
    }

    #[test]
    fn full_speed_constant() {
        assert_eq!(PumpSpeed::FULL.value(), 100);
    }

    #[test]
    fn display() {
        assert_eq!(PumpSpeed::new(45).unwrap().to_string(), "45%");
    }
}
