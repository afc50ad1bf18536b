// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule model and effective-state evaluation.
//!
//! The controller owns the rules and executes them on its own per-minute
//! cycle; this module holds the client-side read model plus the pure
//! functions that answer "what do the rules want right now". Those
//! answers gate manual actions, they never drive the actuators directly.

mod evaluator;
mod rule;

pub use evaluator::{effective_brightness, in_range, light_conflict, pump_scheduled};
pub use rule::{LightRule, PumpRule, Rule, RuleDraft, RuleId, RulesDocument};
