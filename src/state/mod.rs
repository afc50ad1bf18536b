// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client-side cached state.
//!
//! The controller is the source of truth for everything in here; the
//! client keeps a read-mostly mirror that is refreshed by the
//! reconciliation loop and immediately after user actions.

mod pause;
mod snapshot;

pub use pause::PauseState;
pub use snapshot::{
    ActuatorReadings, ControllerSnapshot, Health, LightStatus, PumpStatus, SensorReadings,
};
