// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `GardoR` Lib - A Rust client library for garden controller devices.
//!
//! This library implements the logic layer of a device-control dashboard
//! for a garden controller: a remote device carrying a grow light, an
//! irrigation pump, and environmental sensors, governed by time-of-day
//! rules that the device executes on its own per-minute cycle.
//!
//! # Supported Features
//!
//! - **Effective-state evaluation**: What do the rules want right now?
//!   Wrap-around midnight ranges, fire-at-minute rules, maximum
//!   brightness across overlapping rules
//! - **Manual overrides**: Pause rules for a bounded time and act
//!   against them, in an order safe against the device's own rule tick
//! - **Resume gate**: Manual actions attempted during a pause are held
//!   until the user chooses resume-rules or keep-paused
//! - **Reconciliation**: Adaptive polling that shortens while a pause
//!   runs, so expiry shows up without a manual refresh
//! - **Rule management**: Create, update, and delete rules on the device
//!
//! The device remains the source of truth throughout: it stores the
//! rules, tracks pauses, executes schedules, and times manual watering.
//! The client mirrors that state and keeps the mirror honest.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::FixedOffset;
//! use gardor_lib::monitor::{PollPolicy, Reconciler};
//! use gardor_lib::{Controller, HttpConfig};
//!
//! #[tokio::main]
//! async fn main() -> gardor_lib::Result<()> {
//!     let controller = Controller::new(
//!         HttpConfig::new("192.168.1.60").with_token("session-token"),
//!         // The controller's fixed timezone, not the client machine's.
//!         FixedOffset::east_opt(2 * 3600).unwrap(),
//!     )?;
//!
//!     // Keep the snapshot fresh in the background.
//!     let (reconciler, handle) = Reconciler::new(controller.clone(), PollPolicy::new());
//!     tokio::spawn(reconciler.run());
//!
//!     // Read what the rules currently want.
//!     controller.refresh_rules().await?;
//!     let snapshot = controller.snapshot();
//!     let wanted = gardor_lib::schedule::effective_brightness(
//!         snapshot.rules(),
//!         controller.device_now(),
//!     );
//!     println!("rules want: {wanted:?}");
//!
//!     handle.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # Manual Actions
//!
//! User actions go through [`Controller::submit_manual`], which routes
//! them past the resume gate and the rule-conflict check:
//!
//! ```no_run
//! use chrono::FixedOffset;
//! use gardor_lib::control::{ManualCommand, OverrideRequest, ResumeGate};
//! use gardor_lib::types::{ActuatorClass, OverrideDuration};
//! use gardor_lib::{Controller, HttpConfig, ManualOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> gardor_lib::Result<()> {
//! # let controller = Controller::new(
//! #     HttpConfig::new("192.168.1.60"),
//! #     FixedOffset::east_opt(0).unwrap(),
//! # )?;
//! let mut gate = ResumeGate::new();
//!
//! match controller.submit_manual(&mut gate, ManualCommand::LightOn).await? {
//!     ManualOutcome::Executed => {}
//!     ManualOutcome::AwaitingResumeDecision => {
//!         // Open the resume/keep-paused dialog, then call
//!         // controller.resolve_resume(...) with the user's choice.
//!     }
//!     ManualOutcome::OverrideSuggested(command) => {
//!         // Ask the user for a duration, then:
//!         let duration = OverrideDuration::new(ActuatorClass::Light, 30)?;
//!         let request = OverrideRequest::new(command, duration)?;
//!         controller.execute_override(&request).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod control;
mod controller;
pub mod error;
pub mod monitor;
pub mod protocol;
pub mod schedule;
pub mod state;
pub mod types;

pub use control::{ManualCommand, OverrideRequest, ResumeChoice, ResumeGate};
pub use controller::{Controller, ManualOutcome};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use monitor::{PollPolicy, Reconciler, ReconcilerHandle};
pub use protocol::{HttpClient, HttpConfig};
pub use schedule::{Rule, RuleDraft, RuleId, RulesDocument};
pub use state::{ControllerSnapshot, Health, PauseState};
pub use types::{
    ActuatorClass, Brightness, ClockTime, OverrideDuration, PumpSpeed, SwitchState,
};
