// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation loop keeping the snapshot close to the controller.
//!
//! A single cooperative task re-fetches rules, sensors, and actuator
//! state on a timer. The cadence is adaptive: while either actuator
//! class has a pause running, the loop polls on a short interval so
//! pause expiry shows up within seconds instead of a full base interval.
//! "Is a pause active" is re-derived from the freshly fetched state on
//! every tick, so the cadence adjusts itself without a mode flag.
//!
//! Overlap between a slow tick and user-driven refreshes is not
//! serialized. That is safe because snapshot updates replace whole
//! sections instead of merging; the last fetch to complete wins.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::controller::Controller;
use crate::protocol::Transport;
use crate::state::ControllerSnapshot;

/// Polling cadence of the reconciliation loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gardor_lib::monitor::PollPolicy;
///
/// let policy = PollPolicy::new()
///     .with_base_interval(Duration::from_secs(30))
///     .with_paused_interval(Duration::from_secs(3));
/// assert_eq!(policy.interval(false), Duration::from_secs(30));
/// assert_eq!(policy.interval(true), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    base: Duration,
    while_paused: Duration,
}

impl PollPolicy {
    /// Default interval when no pause is active.
    pub const DEFAULT_BASE: Duration = Duration::from_secs(60);

    /// Default interval while a pause is running.
    pub const DEFAULT_WHILE_PAUSED: Duration = Duration::from_secs(5);

    /// Creates the default policy (60 s base, 5 s while paused).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            while_paused: Self::DEFAULT_WHILE_PAUSED,
        }
    }

    /// Sets the interval used when no pause is active.
    #[must_use]
    pub const fn with_base_interval(mut self, interval: Duration) -> Self {
        self.base = interval;
        self
    }

    /// Sets the interval used while a pause is running.
    #[must_use]
    pub const fn with_paused_interval(mut self, interval: Duration) -> Self {
        self.while_paused = interval;
        self
    }

    /// Returns the interval to sleep before the next tick.
    #[must_use]
    pub const fn interval(&self, pause_active: bool) -> Duration {
        if pause_active { self.while_paused } else { self.base }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for observing and stopping a running [`Reconciler`].
#[derive(Debug)]
pub struct ReconcilerHandle {
    shutdown: watch::Sender<bool>,
    updates: watch::Receiver<ControllerSnapshot>,
}

impl ReconcilerHandle {
    /// Returns a receiver yielding a snapshot after every tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.updates.clone()
    }

    /// Signals the loop to stop.
    ///
    /// Teardown is cooperative: the signal is honored between ticks, and
    /// an in-flight fetch is never aborted; its result simply goes
    /// unobserved.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// The reconciliation loop itself.
///
/// Create it with [`Reconciler::new`] and drive it on the runtime:
///
/// ```no_run
/// use chrono::FixedOffset;
/// use gardor_lib::monitor::{PollPolicy, Reconciler};
/// use gardor_lib::{Controller, HttpConfig};
///
/// # fn main() -> gardor_lib::Result<()> {
/// let controller = Controller::new(
///     HttpConfig::new("192.168.1.60").with_token("session-token"),
///     FixedOffset::east_opt(2 * 3600).unwrap(),
/// )?;
///
/// let (reconciler, handle) = Reconciler::new(controller, PollPolicy::new());
/// tokio::spawn(reconciler.run());
/// // ... later, when the session ends:
/// handle.shutdown();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Reconciler<T: Transport> {
    controller: Controller<T>,
    policy: PollPolicy,
    shutdown: watch::Receiver<bool>,
    updates: watch::Sender<ControllerSnapshot>,
}

impl<T: Transport> Reconciler<T> {
    /// Creates a reconciler and its handle.
    #[must_use]
    pub fn new(controller: Controller<T>, policy: PollPolicy) -> (Self, ReconcilerHandle) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (updates_tx, updates_rx) = watch::channel(controller.snapshot());
        let reconciler = Self {
            controller,
            policy,
            shutdown: shutdown_rx,
            updates: updates_tx,
        };
        let handle = ReconcilerHandle {
            shutdown: shutdown_tx,
            updates: updates_rx,
        };
        (reconciler, handle)
    }

    /// Runs the loop until shut down or the session turns invalid.
    ///
    /// The first tick fires immediately; each subsequent tick waits the
    /// policy interval for the pause state observed after the previous
    /// tick.
    pub async fn run(mut self) {
        loop {
            let keep_running = self.tick().await;
            let _ = self.updates.send(self.controller.snapshot());
            if !keep_running {
                tracing::warn!("session invalid, reconciliation stopped");
                break;
            }

            let pause_active = self.controller.snapshot().pause().any_active(Utc::now());
            let interval = self.policy.interval(pause_active);
            tracing::debug!(interval_secs = interval.as_secs(), pause_active, "tick complete");

            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                () = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// One refresh pass. Returns `false` when polling must halt because
    /// the session token was rejected.
    async fn tick(&self) -> bool {
        match self.controller.refresh_rules().await {
            Ok(()) => {}
            Err(err) if err.is_unauthorized() => return false,
            Err(err) => {
                tracing::warn!(error = %err, "rule refresh failed, rules read as unknown");
            }
        }
        if let Err(err) = self.controller.refresh_sensors().await {
            tracing::warn!(error = %err, "sensor refresh failed, keeping last readings");
        }
        if let Err(err) = self.controller.refresh_actuators().await {
            tracing::warn!(error = %err, "actuator refresh failed, keeping last state");
        }
        true
    }
}
