// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The client-side view of the controller.
//!
//! One snapshot holds everything the dashboard displays: rules, pause
//! state, sensor readings, and actuator state. Updates **replace** whole
//! sections, they never merge field-by-field; whichever async call
//! completes last wins, and a reader can never observe a torn update.

use chrono::{DateTime, Utc};

use crate::schedule::{Rule, RulesDocument};
use crate::state::PauseState;
use crate::types::{Brightness, OverrideDuration, PumpSpeed, SwitchState};

/// Environmental sensor readings, as returned by `GET /api/sensors`.
///
/// All fields are optional: a sensor that is not installed or not yet
/// read simply reports nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SensorReadings {
    /// Air temperature in degrees Celsius.
    #[serde(default)]
    pub temperature_c: Option<f32>,
    /// Relative air humidity (0-100).
    #[serde(default)]
    pub humidity_pct: Option<f32>,
    /// Water reservoir level (0-100).
    #[serde(default)]
    pub water_level_pct: Option<f32>,
}

/// Reported grow-light state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LightStatus {
    /// Whether the light is on.
    pub power: SwitchState,
    /// Current brightness.
    pub brightness: Brightness,
}

/// Reported irrigation pump state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PumpStatus {
    /// Whether the pump is running.
    pub power: SwitchState,
    /// Current pump speed.
    pub speed: PumpSpeed,
}

/// Actuator state as returned by `GET /api/actuators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActuatorReadings {
    /// The grow light.
    pub light: LightStatus,
    /// The irrigation pump.
    pub pump: PumpStatus,
}

/// Connectivity health of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Health {
    /// The last rule fetch succeeded.
    #[default]
    Ok,
    /// The last rule fetch failed; rules and pause state read as unknown.
    Degraded(String),
    /// The session token was rejected; polling has stopped.
    Unauthorized,
}

impl Health {
    /// Returns `true` for [`Health::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Everything the dashboard knows about the controller right now.
///
/// # Update discipline
///
/// Sections are replaced wholesale by the fetch that produced them.
/// There is no per-field merging, so concurrent refreshes (a
/// reconciliation tick racing an override's refetch) degrade to
/// "last fetch to complete wins", which is safe because rule and pause
/// changes are rare next to the polling cadence.
///
/// A failed **rule** fetch deliberately downgrades to unknown: the rule
/// list empties and both pause instants clear, so the UI under-claims
/// "paused" rather than showing a value nobody can vouch for. Sensor and
/// actuator fetch failures keep the last known values instead.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ControllerSnapshot {
    rules: Vec<Rule>,
    pause: PauseState,
    sensors: SensorReadings,
    actuators: Option<ActuatorReadings>,
    health: Health,
}

impl ControllerSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rule list.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the cached pause state.
    #[must_use]
    pub const fn pause(&self) -> &PauseState {
        &self.pause
    }

    /// Returns the last known sensor readings.
    #[must_use]
    pub const fn sensors(&self) -> &SensorReadings {
        &self.sensors
    }

    /// Returns the last known actuator state, if any fetch succeeded yet.
    #[must_use]
    pub const fn actuators(&self) -> Option<&ActuatorReadings> {
        self.actuators.as_ref()
    }

    /// Returns the snapshot health.
    #[must_use]
    pub const fn health(&self) -> &Health {
        &self.health
    }

    /// Replaces rules and pause state from a fetched document.
    pub fn replace_rules(&mut self, document: RulesDocument) {
        self.rules = document.rules;
        self.pause = PauseState::from_reported(
            document.light_rules_paused_until,
            document.pump_rules_paused_until,
        );
        self.health = Health::Ok;
    }

    /// Downgrades rules and pause state to unknown after a failed fetch.
    pub fn degrade_rules(&mut self, message: String) {
        self.rules.clear();
        self.pause.clear();
        self.health = Health::Degraded(message);
    }

    /// Replaces the sensor readings.
    pub fn replace_sensors(&mut self, readings: SensorReadings) {
        self.sensors = readings;
    }

    /// Replaces the actuator state.
    pub fn replace_actuators(&mut self, readings: ActuatorReadings) {
        self.actuators = Some(readings);
    }

    /// Marks the session as invalid.
    pub fn mark_unauthorized(&mut self) {
        self.health = Health::Unauthorized;
    }

    /// Optimistically records a just-requested pause; see
    /// [`PauseState::assume_paused`].
    pub fn assume_paused(&mut self, duration: OverrideDuration, now: DateTime<Utc>) {
        self.pause.assume_paused(duration, now);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::types::ActuatorClass;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn document_with_pause() -> RulesDocument {
        serde_json::from_str(
            r#"{
                "rules": [
                    {"type": "light", "id": "7ad1e6c2-93f5-4f6e-8d7b-0a4baf25c1d9",
                     "start_time": "08:00", "end_time": "20:00", "brightness": 60}
                ],
                "light_rules_paused_until": "2026-04-01T13:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn replace_rules_swaps_everything() {
        let mut snapshot = ControllerSnapshot::new();
        snapshot.replace_rules(document_with_pause());

        assert_eq!(snapshot.rules().len(), 1);
        assert!(
            snapshot
                .pause()
                .is_active(ActuatorClass::Light, at("2026-04-01T12:00:00Z"))
        );
        assert!(snapshot.health().is_ok());

        // A later fetch with no pause replaces, never merges.
        snapshot.replace_rules(RulesDocument::default());
        assert!(snapshot.rules().is_empty());
        assert!(!snapshot.pause().any_active(at("2026-04-01T12:00:00Z")));
    }

    #[test]
    fn degrade_rules_downgrades_to_unknown() {
        let mut snapshot = ControllerSnapshot::new();
        snapshot.replace_rules(document_with_pause());
        snapshot.replace_sensors(SensorReadings {
            temperature_c: Some(21.5),
            ..SensorReadings::default()
        });

        snapshot.degrade_rules("connection refused".to_string());

        assert!(snapshot.rules().is_empty());
        assert!(!snapshot.pause().any_active(at("2026-04-01T12:00:00Z")));
        assert_eq!(
            snapshot.health(),
            &Health::Degraded("connection refused".to_string())
        );
        // Sensors keep their last known values through a rule downgrade.
        assert_eq!(snapshot.sensors().temperature_c, Some(21.5));
    }

    #[test]
    fn successful_fetch_clears_degraded_health() {
        let mut snapshot = ControllerSnapshot::new();
        snapshot.degrade_rules("timeout".to_string());
        snapshot.replace_rules(document_with_pause());
        assert!(snapshot.health().is_ok());
    }

    #[test]
    fn actuators_absent_until_first_fetch() {
        let mut snapshot = ControllerSnapshot::new();
        assert!(snapshot.actuators().is_none());

        let readings: ActuatorReadings = serde_json::from_str(
            r#"{"light": {"power": true, "brightness": 60},
                "pump": {"power": false, "speed": 0}}"#,
        )
        .unwrap();
        snapshot.replace_actuators(readings);

        let actuators = snapshot.actuators().unwrap();
        assert!(actuators.light.power.is_on());
        assert!(actuators.pump.power.is_off());
    }

    #[test]
    fn unauthorized_overrides_health() {
        let mut snapshot = ControllerSnapshot::new();
        snapshot.mark_unauthorized();
        assert_eq!(snapshot.health(), &Health::Unauthorized);
    }
}
