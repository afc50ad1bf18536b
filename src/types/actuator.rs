// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator classes of the garden controller.

use std::fmt;

/// One of the two actuator classes governed by time-of-day rules.
///
/// Rules, pauses, and manual overrides are always scoped to a single
/// class: the grow light or the irrigation pump.
///
/// # Examples
///
/// ```
/// use gardor_lib::types::ActuatorClass;
///
/// assert_eq!(ActuatorClass::Light.as_str(), "light");
/// assert_eq!(ActuatorClass::Pump.as_str(), "pump");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorClass {
    /// The grow light.
    Light,
    /// The irrigation pump.
    Pump,
}

impl ActuatorClass {
    /// Returns the identifier used in API paths and rule payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Pump => "pump",
        }
    }
}

impl fmt::Display for ActuatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_identifier() {
        assert_eq!(ActuatorClass::Light.to_string(), "light");
        assert_eq!(ActuatorClass::Pump.to_string(), "pump");
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&ActuatorClass::Pump).unwrap();
        assert_eq!(json, "\"pump\"");
        let back: ActuatorClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ActuatorClass::Pump);
    }
}
