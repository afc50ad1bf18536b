// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for a garden controller.
//!
//! [`Controller`] wraps a [`Transport`] with typed operations over the
//! REST API and owns the shared [`ControllerSnapshot`]. All workflow
//! ordering guarantees (pause before act, resume before run) live here,
//! established by sequencing awaits, never by locks.

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use parking_lot::RwLock;

use crate::control::{
    GateCheck, GateResolution, ManualCommand, OverrideRequest, ResumeChoice, ResumeGate,
    requires_override,
};
use crate::error::{Error, ParseError, Result, ValueError};
use crate::protocol::{HttpClient, HttpConfig, Transport};
use crate::schedule::{Rule, RuleDraft, RuleId, RulesDocument};
use crate::state::ControllerSnapshot;
use crate::types::{
    ActuatorClass, Brightness, ClockTime, OverrideDuration, PumpSpeed, SwitchState,
};

/// What happened to a manual action submitted through
/// [`Controller::submit_manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualOutcome {
    /// The action ran immediately; no pause, no rule conflict.
    Executed,
    /// A pause is in effect; the action is held in the gate until the
    /// user answers resume-or-keep-paused.
    AwaitingResumeDecision,
    /// The action disagrees with the rules (or is manual watering); ask
    /// the user for a duration and run
    /// [`Controller::execute_override`].
    OverrideSuggested(ManualCommand),
}

/// Typed client for one garden controller.
///
/// Cloning is cheap and every clone shares the same snapshot, so the
/// reconciliation loop and user-driven workflows observe one view.
///
/// # Examples
///
/// ```no_run
/// use chrono::FixedOffset;
/// use gardor_lib::{Controller, HttpConfig};
///
/// #[tokio::main]
/// async fn main() -> gardor_lib::Result<()> {
///     let controller = Controller::new(
///         HttpConfig::new("192.168.1.60").with_token("session-token"),
///         FixedOffset::east_opt(2 * 3600).unwrap(),
///     )?;
///
///     controller.refresh_rules().await?;
///     let snapshot = controller.snapshot();
///     println!("{} rules", snapshot.rules().len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Controller<T: Transport> {
    transport: Arc<T>,
    timezone: FixedOffset,
    state: Arc<RwLock<ControllerSnapshot>>,
}

impl Controller<HttpClient> {
    /// Creates a controller client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created from `config`.
    pub fn new(config: HttpConfig, timezone: FixedOffset) -> Result<Self> {
        Ok(Self::with_transport(config.into_client()?, timezone))
    }
}

impl<T: Transport> Clone for Controller<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            timezone: self.timezone,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport> Controller<T> {
    /// Creates a controller client over a custom transport.
    ///
    /// `timezone` is the controller's fixed UTC offset; rule times are
    /// always compared in that timezone, never the client machine's.
    pub fn with_transport(transport: T, timezone: FixedOffset) -> Self {
        Self {
            transport: Arc::new(transport),
            timezone,
            state: Arc::new(RwLock::new(ControllerSnapshot::new())),
        }
    }

    /// Returns the controller's timezone.
    #[must_use]
    pub const fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Returns the controller's current wall-clock time of day.
    #[must_use]
    pub fn device_now(&self) -> ClockTime {
        ClockTime::at(Utc::now(), self.timezone)
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.state.read().clone()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches the rules document without touching the snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request or parsing fails.
    pub async fn fetch_rules(&self) -> Result<RulesDocument> {
        let response = self.transport.get("/api/rules").await?;
        Ok(response.parse()?)
    }

    /// Fetches rules and pause state and replaces them in the snapshot.
    ///
    /// On failure the snapshot deliberately downgrades: the rule list
    /// empties and pause state clears, so the UI shows "unknown" instead
    /// of a value nobody can vouch for. A rejected token additionally
    /// marks the session invalid.
    ///
    /// # Errors
    ///
    /// Returns the underlying fetch error after recording the downgrade.
    pub async fn refresh_rules(&self) -> Result<()> {
        match self.fetch_rules().await {
            Ok(document) => {
                self.state.write().replace_rules(document);
                Ok(())
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.state.write().mark_unauthorized();
                } else {
                    self.state.write().degrade_rules(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Fetches sensor readings and replaces them in the snapshot.
    ///
    /// On failure the last known readings stay visible.
    ///
    /// # Errors
    ///
    /// Returns error if the request or parsing fails.
    pub async fn refresh_sensors(&self) -> Result<()> {
        let response = self.transport.get("/api/sensors").await?;
        let readings = response.parse()?;
        self.state.write().replace_sensors(readings);
        Ok(())
    }

    /// Fetches actuator state and replaces it in the snapshot.
    ///
    /// On failure the last known state stays visible.
    ///
    /// # Errors
    ///
    /// Returns error if the request or parsing fails.
    pub async fn refresh_actuators(&self) -> Result<()> {
        let response = self.transport.get("/api/actuators").await?;
        let readings = response.parse()?;
        self.state.write().replace_actuators(readings);
        Ok(())
    }

    // =========================================================================
    // Pause / resume
    // =========================================================================

    /// Pauses all rules of the duration's class on the controller.
    ///
    /// The snapshot optimistically records the pause until the next rule
    /// fetch replaces it with what the controller reports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn pause_rules(&self, duration: OverrideDuration) -> Result<()> {
        tracing::info!(class = %duration.class(), minutes = duration.minutes(), "pausing rules");
        let path = format!("/api/rules/{}/pause", duration.class());
        let body = serde_json::json!({ "minutes": duration.minutes() });
        self.transport.post(&path, Some(body)).await?;
        self.state.write().assume_paused(duration, Utc::now());
        Ok(())
    }

    /// Clears the pause for a class, restoring rule-driven control.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn resume_rules(&self, class: ActuatorClass) -> Result<()> {
        tracing::info!(class = %class, "resuming rules");
        let path = format!("/api/rules/{class}/resume");
        self.transport.post(&path, None).await?;
        Ok(())
    }

    // =========================================================================
    // Actuator commands
    // =========================================================================

    /// Switches the grow light on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_light_power(&self, power: SwitchState) -> Result<()> {
        let body = serde_json::json!({ "power": power.is_on() });
        self.transport.post("/api/light", Some(body)).await?;
        Ok(())
    }

    /// Sets the grow-light brightness.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_light_brightness(&self, brightness: Brightness) -> Result<()> {
        let body = serde_json::json!({ "brightness": brightness.value() });
        self.transport.post("/api/light", Some(body)).await?;
        Ok(())
    }

    /// Switches the pump on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_pump_power(&self, power: SwitchState) -> Result<()> {
        let body = serde_json::json!({ "power": power.is_on() });
        self.transport.post("/api/pump", Some(body)).await?;
        Ok(())
    }

    /// Sets the pump speed.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_pump_speed(&self, speed: PumpSpeed) -> Result<()> {
        let body = serde_json::json!({ "speed": speed.value() });
        self.transport.post("/api/pump", Some(body)).await?;
        Ok(())
    }

    /// Asks the controller to switch the pump off after `run_time`.
    ///
    /// The controller is the timer authority for manual watering; the
    /// client never runs its own off-timer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ClassMismatch` for a light-bounded duration,
    /// or a protocol error if the request fails.
    pub async fn schedule_pump_auto_off(&self, run_time: OverrideDuration) -> Result<()> {
        if run_time.class() != ActuatorClass::Pump {
            return Err(ValueError::ClassMismatch {
                expected: ActuatorClass::Pump,
                actual: run_time.class(),
            }
            .into());
        }
        let body = serde_json::json!({ "minutes": run_time.minutes() });
        self.transport.post("/api/pump/auto_off", Some(body)).await?;
        Ok(())
    }

    /// Executes a manual command, bypassing gate and conflict checks.
    ///
    /// Manual watering expands to three calls in a fixed order:
    /// schedule the auto-off, set full speed, switch on.
    ///
    /// # Errors
    ///
    /// Returns error if any underlying request fails.
    pub async fn execute_command(&self, command: &ManualCommand) -> Result<()> {
        match command {
            ManualCommand::LightOn => self.set_light_power(SwitchState::On).await,
            ManualCommand::LightOff => self.set_light_power(SwitchState::Off).await,
            ManualCommand::LightBrightness(brightness) => {
                self.set_light_brightness(*brightness).await
            }
            ManualCommand::PumpOn(run_time) => {
                self.schedule_pump_auto_off(*run_time).await?;
                self.set_pump_speed(PumpSpeed::FULL).await?;
                self.set_pump_power(SwitchState::On).await
            }
            ManualCommand::PumpOff => self.set_pump_power(SwitchState::Off).await,
        }
    }

    // =========================================================================
    // Workflows
    // =========================================================================

    /// Submits a user's manual action through the resume gate and the
    /// conflict check.
    ///
    /// Returns what the UI should do next: nothing (already executed),
    /// open the resume dialog, or open the override duration prompt.
    ///
    /// # Errors
    ///
    /// Returns error if an immediately-executed action fails.
    pub async fn submit_manual(
        &self,
        gate: &mut ResumeGate,
        command: ManualCommand,
    ) -> Result<ManualOutcome> {
        let snapshot = self.snapshot();
        match gate.submit(command, snapshot.pause(), Utc::now()) {
            GateCheck::Held => Ok(ManualOutcome::AwaitingResumeDecision),
            GateCheck::Proceed(command) => {
                if requires_override(
                    snapshot.rules(),
                    snapshot.actuators(),
                    self.device_now(),
                    &command,
                ) {
                    Ok(ManualOutcome::OverrideSuggested(command))
                } else {
                    self.execute_command(&command).await?;
                    self.refresh_after_action().await;
                    Ok(ManualOutcome::Executed)
                }
            }
        }
    }

    /// Runs a confirmed override: pause, refetch, act, refetch.
    ///
    /// The order is the contract. Acting before the pause is
    /// acknowledged would let the controller's own rule tick undo the
    /// manual action within a minute; refetching before acting makes the
    /// new pause visible to anything observing the snapshot.
    ///
    /// # Errors
    ///
    /// A failed pause returns its error with nothing else done. Once the
    /// pause succeeded, any later failure is wrapped in
    /// [`Error::ActionFailedWhilePaused`] so the caller can tell the
    /// user that rules are paused even though the action didn't land.
    pub async fn execute_override(&self, request: &OverrideRequest) -> Result<()> {
        tracing::info!(
            class = %request.class(),
            duration = %request.duration(),
            "starting manual override"
        );
        self.pause_rules(request.duration()).await?;
        if let Err(err) = self.paused_action(request).await {
            return Err(Error::ActionFailedWhilePaused(Box::new(err)));
        }
        if let Err(err) = self.refresh_sensors().await {
            tracing::warn!(error = %err, "sensor refresh after override failed");
        }
        self.refresh_after_action().await;
        Ok(())
    }

    async fn paused_action(&self, request: &OverrideRequest) -> Result<()> {
        self.refresh_rules().await?;
        self.execute_command(request.command()).await
    }

    /// Applies the user's resume-dialog choice for one actuator class.
    ///
    /// - Resume: clears the pause, refetches rules, then runs the
    ///   pending command. If the resume call fails the command is **not**
    ///   run; executing it under a false premise is worse than dropping
    ///   it.
    /// - Keep paused: runs the pending command without touching the
    ///   pause.
    /// - Dismissed: drops the pending command; no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResumeFailed`] if the resume call fails, or the
    /// underlying error if a later step does.
    pub async fn resolve_resume(
        &self,
        gate: &mut ResumeGate,
        class: ActuatorClass,
        choice: ResumeChoice,
    ) -> Result<()> {
        match gate.resolve(class, choice) {
            GateResolution::Discarded => Ok(()),
            GateResolution::RunWhilePaused(command) => {
                tracing::info!(class = %class, "running manual action while rules stay paused");
                self.execute_command(&command).await?;
                self.refresh_after_action().await;
                Ok(())
            }
            GateResolution::ResumeThenRun(command) => {
                if let Err(err) = self.resume_rules(class).await {
                    return Err(Error::ResumeFailed(Box::new(err)));
                }
                self.refresh_rules().await?;
                self.execute_command(&command).await?;
                self.refresh_after_action().await;
                Ok(())
            }
        }
    }

    async fn refresh_after_action(&self) {
        if let Err(err) = self.refresh_actuators().await {
            tracing::warn!(error = %err, "actuator refresh after manual action failed");
        }
    }

    // =========================================================================
    // Rule CRUD
    // =========================================================================

    /// Creates a rule on the controller and refetches the rule list.
    ///
    /// The controller assigns the identifier; the created rule is
    /// returned as stored.
    ///
    /// # Errors
    ///
    /// Returns error if the request, parsing, or refetch fails.
    pub async fn create_rule(&self, draft: &RuleDraft) -> Result<Rule> {
        let body = serde_json::to_value(draft).map_err(ParseError::Json)?;
        let response = self.transport.post("/api/rules", Some(body)).await?;
        let created: Rule = response.parse()?;
        self.refresh_rules().await?;
        Ok(created)
    }

    /// Updates a stored rule and refetches the rule list.
    ///
    /// # Errors
    ///
    /// Returns error if the request or refetch fails.
    pub async fn update_rule(&self, rule: &Rule) -> Result<()> {
        let body = serde_json::to_value(rule).map_err(ParseError::Json)?;
        let path = format!("/api/rules/{}", rule.id());
        self.transport.put(&path, body).await?;
        self.refresh_rules().await
    }

    /// Deletes a stored rule and refetches the rule list.
    ///
    /// # Errors
    ///
    /// Returns error if the request or refetch fails.
    pub async fn delete_rule(&self, id: RuleId) -> Result<()> {
        let path = format!("/api/rules/{id}");
        self.transport.delete(&path).await?;
        self.refresh_rules().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::ApiResponse;

    /// Transport that fails every request; enough to test pure behavior.
    struct DeadTransport;

    impl Transport for DeadTransport {
        async fn get(&self, _path: &str) -> std::result::Result<ApiResponse, ProtocolError> {
            Err(ProtocolError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }

        async fn post(
            &self,
            _path: &str,
            _body: Option<serde_json::Value>,
        ) -> std::result::Result<ApiResponse, ProtocolError> {
            Err(ProtocolError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }

        async fn put(
            &self,
            _path: &str,
            _body: serde_json::Value,
        ) -> std::result::Result<ApiResponse, ProtocolError> {
            Err(ProtocolError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }

        async fn delete(&self, _path: &str) -> std::result::Result<ApiResponse, ProtocolError> {
            Err(ProtocolError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }
    }

    fn controller() -> Controller<DeadTransport> {
        Controller::with_transport(DeadTransport, FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn clones_share_one_snapshot() {
        let a = controller();
        let b = a.clone();
        a.state.write().degrade_rules("down".to_string());
        assert!(!b.snapshot().health().is_ok());
    }

    #[tokio::test]
    async fn auto_off_rejects_light_durations() {
        let controller = controller();
        let duration = OverrideDuration::new(ActuatorClass::Light, 30).unwrap();
        let err = controller.schedule_pump_auto_off(duration).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::ClassMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn failed_rule_refresh_degrades_snapshot() {
        let controller = controller();
        assert!(controller.refresh_rules().await.is_err());
        let snapshot = controller.snapshot();
        assert!(snapshot.rules().is_empty());
        assert!(!snapshot.health().is_ok());
    }

    #[tokio::test]
    async fn failed_override_pause_reports_plain_error() {
        let controller = controller();
        let duration = OverrideDuration::new(ActuatorClass::Pump, 10).unwrap();
        let request = OverrideRequest::manual_watering(duration).unwrap();
        let err = controller.execute_override(&request).await.unwrap_err();
        // The pause itself failed, so this is not a partial success.
        assert!(!matches!(err, Error::ActionFailedWhilePaused(_)));
    }
}
