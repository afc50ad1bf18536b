// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time-of-day rules as stored and executed by the controller.
//!
//! Rules are owned by the controller: it assigns their identifiers,
//! persists them, and fires them on its own per-minute cycle. The client
//! only reads them back, evaluates what they currently imply (see
//! [`evaluator`](super)), and submits create/update/delete requests.

use std::fmt;
use std::num::NonZeroU16;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{ActuatorClass, Brightness, ClockTime};

/// Identifier of a stored rule, assigned by the controller.
///
/// The client never mints identifiers for stored rules; creation payloads
/// ([`RuleDraft`]) carry none.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for RuleId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_enabled() -> bool {
    true
}

/// A grow-light rule.
///
/// With an `end_time`, the rule holds `brightness` over the range
/// `[start_time, end_time)`; the range may wrap midnight. Without one,
/// the rule fires once at `start_time` and the light keeps that value
/// until something else changes it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LightRule {
    /// Controller-assigned identifier.
    pub id: RuleId,
    /// When the rule starts applying.
    pub start_time: ClockTime,
    /// When it stops applying; `None` means fire-at-minute.
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    /// Brightness the rule asks for. 0 is a definite "off".
    pub brightness: Brightness,
    /// Disabled rules are kept but never applied.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Individually paused rules are kept but never applied.
    #[serde(default)]
    pub paused: bool,
}

/// An irrigation pump rule: run for `duration_minutes` starting at `time`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PumpRule {
    /// Controller-assigned identifier.
    pub id: RuleId,
    /// When the watering starts.
    pub time: ClockTime,
    /// How long the pump runs.
    pub duration_minutes: NonZeroU16,
    /// Disabled rules are kept but never applied.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Individually paused rules are kept but never applied.
    #[serde(default)]
    pub paused: bool,
}

/// A stored rule for either actuator class.
///
/// # Wire format
///
/// Rules are tagged by a `"type"` field:
///
/// ```json
/// {"type": "light", "id": "…", "start_time": "08:00", "end_time": "20:00",
///  "brightness": 60, "enabled": true, "paused": false}
/// {"type": "pump", "id": "…", "time": "07:30", "duration_minutes": 10,
///  "enabled": true, "paused": false}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Rule {
    /// A grow-light rule.
    Light(LightRule),
    /// An irrigation pump rule.
    Pump(PumpRule),
}

impl Rule {
    /// Returns the controller-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> RuleId {
        match self {
            Self::Light(rule) => rule.id,
            Self::Pump(rule) => rule.id,
        }
    }

    /// Returns the actuator class this rule governs.
    #[must_use]
    pub const fn class(&self) -> ActuatorClass {
        match self {
            Self::Light(_) => ActuatorClass::Light,
            Self::Pump(_) => ActuatorClass::Pump,
        }
    }

    /// Returns `true` if the rule participates in effective-state
    /// computation (enabled and not individually paused).
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        match self {
            Self::Light(rule) => rule.enabled && !rule.paused,
            Self::Pump(rule) => rule.enabled && !rule.paused,
        }
    }
}

/// Payload for creating a rule; the controller assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuleDraft {
    /// A new grow-light rule.
    Light {
        /// When the rule starts applying.
        start_time: ClockTime,
        /// When it stops applying; `None` means fire-at-minute.
        #[serde(default)]
        end_time: Option<ClockTime>,
        /// Brightness the rule asks for.
        brightness: Brightness,
    },
    /// A new irrigation pump rule.
    Pump {
        /// When the watering starts.
        time: ClockTime,
        /// How long the pump runs.
        duration_minutes: NonZeroU16,
    },
}

/// The rules read model, as returned by `GET /api/rules`.
///
/// Pause fields are part of this document on purpose: every rule fetch
/// refreshes them atomically with the rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RulesDocument {
    /// All stored rules, both classes mixed.
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Instant until which light rules are suspended, if any.
    #[serde(default)]
    pub light_rules_paused_until: Option<DateTime<Utc>>,
    /// Instant until which pump rules are suspended, if any.
    #[serde(default)]
    pub pump_rules_paused_until: Option<DateTime<Utc>>,
}
