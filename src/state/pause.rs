// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-class rule pause state.

use chrono::{DateTime, Duration, Utc};

use crate::types::{ActuatorClass, OverrideDuration};

/// Until when each actuator class ignores its rules.
///
/// The controller owns this state; the client only mirrors what the last
/// successful rule fetch reported. A `paused_until` in the past means the
/// same as no pause at all, so gating decisions always pass an explicit
/// `now`.
///
/// The one exception to "fetched, never computed" is
/// [`assume_paused`](Self::assume_paused): right after issuing a pause
/// request the client may optimistically record it, valid only until the
/// next successful refresh replaces the whole value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PauseState {
    light_until: Option<DateTime<Utc>>,
    pump_until: Option<DateTime<Utc>>,
}

impl PauseState {
    /// Creates an empty pause state (no class paused).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pause state from the two reported instants.
    #[must_use]
    pub const fn from_reported(
        light_until: Option<DateTime<Utc>>,
        pump_until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            light_until,
            pump_until,
        }
    }

    /// Returns the reported pause instant for a class, expired or not.
    #[must_use]
    pub const fn until(&self, class: ActuatorClass) -> Option<DateTime<Utc>> {
        match class {
            ActuatorClass::Light => self.light_until,
            ActuatorClass::Pump => self.pump_until,
        }
    }

    /// Returns `true` if the class is paused at `now`.
    ///
    /// An instant at or before `now` counts as expired, identically to
    /// no pause being reported at all.
    #[must_use]
    pub fn is_active(&self, class: ActuatorClass, now: DateTime<Utc>) -> bool {
        self.until(class).is_some_and(|until| until > now)
    }

    /// Returns `true` if either class is paused at `now`.
    ///
    /// The reconciliation loop polls faster while this holds, so pause
    /// expiry is noticed within one short interval.
    #[must_use]
    pub fn any_active(&self, now: DateTime<Utc>) -> bool {
        self.is_active(ActuatorClass::Light, now) || self.is_active(ActuatorClass::Pump, now)
    }

    /// Optimistically records a just-requested pause.
    ///
    /// Bridges the gap between a pause request being acknowledged and the
    /// next rule fetch; the fetch replaces this value wholesale.
    pub fn assume_paused(
        &mut self,
        duration: OverrideDuration,
        now: DateTime<Utc>,
    ) {
        let until = Some(now + Duration::minutes(i64::from(duration.minutes())));
        match duration.class() {
            ActuatorClass::Light => self.light_until = until,
            ActuatorClass::Pump => self.pump_until = until,
        }
    }

    /// Forgets both pause instants.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
