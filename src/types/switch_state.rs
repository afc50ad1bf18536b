// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off state for actuators.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The on/off state of an actuator.
///
/// The controller API represents this as a JSON boolean; the string form
/// exists for display and for parsing user-facing toggles.
///
/// # Examples
///
/// ```
/// use gardor_lib::types::SwitchState;
///
/// let on = SwitchState::On;
/// assert!(on.is_on());
/// assert_eq!(on.to_string(), "on");
///
/// let parsed: SwitchState = "OFF".parse().unwrap();
/// assert_eq!(parsed, SwitchState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum SwitchState {
    /// The actuator is off.
    Off,
    /// The actuator is on.
    On,
}

impl SwitchState {
    /// Returns `true` if the state is `On`.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns `true` if the state is `Off`.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(ValueError::InvalidSwitchState(s.to_string())),
        }
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<SwitchState> for bool {
    fn from(value: SwitchState) -> Self {
        value.is_on()
    }
}
