// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manual actions a user can request from the dashboard.

use crate::types::{ActuatorClass, Brightness, OverrideDuration};

/// A manual actuator action requested by the user.
///
/// Manual watering always carries its run time: the pump has no implicit
/// "stay on" state, so the controller is asked to schedule the auto-off
/// whenever the pump is switched on by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualCommand {
    /// Turn the grow light on.
    LightOn,
    /// Turn the grow light off.
    LightOff,
    /// Set the grow light to a specific brightness.
    LightBrightness(Brightness),
    /// Run the pump at full speed for the given time.
    PumpOn(OverrideDuration),
    /// Stop the pump.
    PumpOff,
}

impl ManualCommand {
    /// Returns the actuator class this command targets.
    #[must_use]
    pub const fn class(&self) -> ActuatorClass {
        match self {
            Self::LightOn | Self::LightOff | Self::LightBrightness(_) => ActuatorClass::Light,
            Self::PumpOn(_) | Self::PumpOff => ActuatorClass::Pump,
        }
    }

    /// For light commands, whether the user wants the light on.
    ///
    /// Setting brightness 0 counts as wanting it off. Pump commands
    /// return `None`; their conflicts are not brightness-based.
    #[must_use]
    pub const fn light_wants_on(&self) -> Option<bool> {
        match self {
            Self::LightOn => Some(true),
            Self::LightOff => Some(false),
            Self::LightBrightness(brightness) => Some(!brightness.is_off()),
            Self::PumpOn(_) | Self::PumpOff => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_of_each_command() {
        assert_eq!(ManualCommand::LightOn.class(), ActuatorClass::Light);
        assert_eq!(
            ManualCommand::LightBrightness(Brightness::MAX).class(),
            ActuatorClass::Light
        );
        assert_eq!(ManualCommand::PumpOff.class(), ActuatorClass::Pump);
    }

    #[test]
    fn light_wants_on() {
        assert_eq!(ManualCommand::LightOn.light_wants_on(), Some(true));
        assert_eq!(ManualCommand::LightOff.light_wants_on(), Some(false));
        assert_eq!(
            ManualCommand::LightBrightness(Brightness::MIN).light_wants_on(),
            Some(false)
        );
        assert_eq!(
            ManualCommand::LightBrightness(Brightness::new(30).unwrap()).light_wants_on(),
            Some(true)
        );
        assert_eq!(ManualCommand::PumpOff.light_wants_on(), None);
    }
}
