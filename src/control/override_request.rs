// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User intent to act against what the rules currently want.
//!
//! An override bundles the manual action with a bounded pause of the
//! class's rules, so the controller's own rule tick cannot immediately
//! undo the action. The request is ephemeral: it is executed once by
//! [`Controller::execute_override`](crate::Controller::execute_override)
//! or simply dropped on cancel, with no network call made.

use crate::control::ManualCommand;
use crate::error::ValueError;
use crate::schedule::{self, Rule};
use crate::state::ActuatorReadings;
use crate::types::{ActuatorClass, ClockTime, OverrideDuration};

/// A manual action paired with the rule pause that protects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideRequest {
    command: ManualCommand,
    duration: OverrideDuration,
}

impl OverrideRequest {
    /// Creates an override request, validating that the pause duration
    /// is bounded for the command's actuator class.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ClassMismatch` if the duration was created
    /// for the other class.
    pub fn new(
        command: ManualCommand,
        duration: OverrideDuration,
    ) -> Result<Self, ValueError> {
        if duration.class() != command.class() {
            return Err(ValueError::ClassMismatch {
                expected: command.class(),
                actual: duration.class(),
            });
        }
        Ok(Self { command, duration })
    }

    /// Creates a manual-watering override: the chosen duration is both
    /// the pump run time and the length of the pump-rule pause.
    #[must_use]
    pub fn manual_watering(duration: OverrideDuration) -> Option<Self> {
        if duration.class() != ActuatorClass::Pump {
            return None;
        }
        Some(Self {
            command: ManualCommand::PumpOn(duration),
            duration,
        })
    }

    /// Returns the manual action to perform once rules are paused.
    #[must_use]
    pub const fn command(&self) -> &ManualCommand {
        &self.command
    }

    /// Returns how long the class's rules will be paused.
    #[must_use]
    pub const fn duration(&self) -> OverrideDuration {
        self.duration
    }

    /// Returns the actuator class being overridden.
    #[must_use]
    pub const fn class(&self) -> ActuatorClass {
        self.duration.class()
    }
}

/// Decides whether a manual command needs the override workflow.
///
/// - Light commands need it when the rules currently want the opposite
///   on-ness (see [`schedule::light_conflict`]).
/// - Switching the pump on needs it whenever the pump is not already
///   reported running: manual watering always asks for a duration, so
///   an unknown actuator state is treated like "off".
/// - Switching the pump off never does.
#[must_use]
pub fn requires_override(
    rules: &[Rule],
    actuators: Option<&ActuatorReadings>,
    now: ClockTime,
    command: &ManualCommand,
) -> bool {
    match command {
        ManualCommand::PumpOn(_) => !actuators.is_some_and(|a| a.pump.power.is_on()),
        ManualCommand::PumpOff => false,
        _ => command
            .light_wants_on()
            .is_some_and(|wants_on| schedule::light_conflict(rules, now, wants_on)),
    }
}
