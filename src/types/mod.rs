// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! Everything that crosses the wire or carries a range constraint gets a
//! dedicated type here, so invalid values are unrepresentable past the
//! construction site.
//!
//! # Types
//!
//! - [`ActuatorClass`] - Light or pump, the two rule-governed actuators
//! - [`Brightness`] - Grow-light brightness (0-100%)
//! - [`ClockTime`] - `HH:MM` wall time in the controller's timezone
//! - [`OverrideDuration`] - Bounded pause/watering durations
//! - [`PumpSpeed`] - Pump speed (0-100%)
//! - [`SwitchState`] - On/off state

mod actuator;
mod brightness;
mod clock_time;
mod override_duration;
mod pump_speed;
mod switch_state;

pub use actuator::ActuatorClass;
pub use brightness::Brightness;
pub use clock_time::ClockTime;
pub use override_duration::OverrideDuration;
pub use pump_speed::PumpSpeed;
pub use switch_state::SwitchState;
