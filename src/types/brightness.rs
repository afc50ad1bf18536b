// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for grow-light control.
//!
//! This module provides a type-safe representation of brightness values,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use crate::error::ValueError;

/// Grow-light brightness as a percentage (0-100).
///
/// A brightness of 0 is a definite "off", which is not the same thing as
/// no rule matching at all; see
/// [`effective_brightness`](crate::schedule::effective_brightness).
///
/// # Examples
///
/// ```
/// use gardor_lib::types::Brightness;
///
/// let b = Brightness::new(75).unwrap();
/// assert_eq!(b.value(), 75);
///
/// let off = Brightness::MIN;
/// let full = Brightness::MAX;
/// assert_eq!(off.value(), 0);
/// assert_eq!(full.value(), 100);
///
/// // Invalid values return error
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (0%, off).
    pub const MIN: Self = Self(0);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Arguments
    ///
    /// * `value` - The brightness percentage (0-100)
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

    /// Creates a brightness value, clamping to the valid range.
    ///
    /// Values above 100 are clamped to 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use gardor_lib::types::Brightness;
    ///
    /// assert_eq!(Brightness::clamped(150).value(), 100);
    /// ```
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this brightness means the light is off.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}
