// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gate that intercepts manual actions while rules are paused.
//!
//! When the user touches a control while its actuator class is paused,
//! the action is not executed. It is captured here and the UI asks
//! whether to resume rule-following first or keep the pause. The
//! captured command is consumed exactly once, or discarded if the user
//! closes the dialog without choosing.

use chrono::{DateTime, Utc};

use crate::control::ManualCommand;
use crate::state::PauseState;
use crate::types::ActuatorClass;

/// State of one actuator class within the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum GateState {
    /// No pause in effect for this class; actions pass straight through.
    #[default]
    Unguarded,
    /// A manual action was attempted while paused and awaits the user's
    /// resume/keep-paused decision.
    AwaitingDecision(ManualCommand),
}

/// Outcome of submitting a manual command to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCheck {
    /// No pause in effect; execute the command now.
    Proceed(ManualCommand),
    /// The command was captured; ask the user how to proceed.
    Held,
}

/// The user's answer to the resume/keep-paused dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeChoice {
    /// Clear the pause, then run the pending command.
    ResumeRules,
    /// Leave the pause in place and run the pending command anyway.
    KeepPaused,
    /// Dialog closed without a choice; drop the pending command.
    Dismissed,
}

/// What the caller must do after resolving the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResolution {
    /// Issue a resume request, refetch rules, then run the command.
    ResumeThenRun(ManualCommand),
    /// Run the command without touching the pause.
    RunWhilePaused(ManualCommand),
    /// Nothing to do; the pending command was discarded.
    Discarded,
}

/// Per-class interceptor for manual actions during a pause.
///
/// At most one command is pending per actuator class; submitting another
/// while one is outstanding replaces it silently (last request wins).
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use gardor_lib::control::{GateCheck, ManualCommand, ResumeGate};
/// use gardor_lib::state::PauseState;
///
/// let mut gate = ResumeGate::new();
/// let pause = PauseState::new();
///
/// // Nothing paused: commands pass through.
/// let check = gate.submit(ManualCommand::LightOn, &pause, Utc::now());
/// assert_eq!(check, GateCheck::Proceed(ManualCommand::LightOn));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeGate {
    light: GateState,
    pump: GateState,
}

impl ResumeGate {
    /// Creates a gate with both classes unguarded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a manual command against the current pause state.
    ///
    /// If the command's class has a pause in effect at `now`, the
    /// command is captured (replacing any previously pending one) and
    /// [`GateCheck::Held`] is returned; the caller must not execute it
    /// until [`resolve`](Self::resolve) says so.
    pub fn submit(
        &mut self,
        command: ManualCommand,
        pause: &PauseState,
        now: DateTime<Utc>,
    ) -> GateCheck {
        let class = command.class();
        if pause.is_active(class, now) {
            *self.slot_mut(class) = GateState::AwaitingDecision(command);
            GateCheck::Held
        } else {
            GateCheck::Proceed(command)
        }
    }

    /// Resolves the pending decision for a class.
    ///
    /// Consumes the pending command whatever the choice was: afterwards
    /// the class is unguarded again. Resolving a class with nothing
    /// pending yields [`GateResolution::Discarded`].
    pub fn resolve(&mut self, class: ActuatorClass, choice: ResumeChoice) -> GateResolution {
        let slot = self.slot_mut(class);
        let GateState::AwaitingDecision(command) = *slot else {
            return GateResolution::Discarded;
        };
        *slot = GateState::Unguarded;
        match choice {
            ResumeChoice::ResumeRules => GateResolution::ResumeThenRun(command),
            ResumeChoice::KeepPaused => GateResolution::RunWhilePaused(command),
            ResumeChoice::Dismissed => GateResolution::Discarded,
        }
    }

    /// Returns the pending command for a class, if any.
    #[must_use]
    pub const fn pending(&self, class: ActuatorClass) -> Option<&ManualCommand> {
        match self.slot(class) {
            GateState::AwaitingDecision(command) => Some(command),
            GateState::Unguarded => None,
        }
    }

    /// Returns `true` if a decision is pending for the class.
    #[must_use]
    pub const fn is_awaiting(&self, class: ActuatorClass) -> bool {
        self.pending(class).is_some()
    }

    const fn slot(&self, class: ActuatorClass) -> &GateState {
        match class {
            ActuatorClass::Light => &self.light,
            ActuatorClass::Pump => &self.pump,
        }
    }

    const fn slot_mut(&mut self, class: ActuatorClass) -> &mut GateState {
        match class {
            ActuatorClass::Light => &mut self.light,
            ActuatorClass::Pump => &mut self.pump,
        }
    }
}
