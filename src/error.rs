// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `GardoR` library.
//!
//! This module provides the error hierarchy for failures across the
//! library: value validation, HTTP communication, JSON parsing, and the
//! manual-override workflows.

use thiserror::Error;

use crate::types::ActuatorClass;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking
/// to a garden controller.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rules were paused, but a later step of the override did not complete.
    ///
    /// The distinction matters to callers: rules are now suspended on the
    /// controller even though the manual action never took effect.
    #[error("rules are paused but the manual action did not complete: {0}")]
    ActionFailedWhilePaused(#[source] Box<Error>),

    /// Resuming rule-driven control failed; the pending manual action was
    /// not executed.
    #[error("failed to resume rules, manual action not executed: {0}")]
    ResumeFailed(#[source] Box<Error>),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A wall-clock time string could not be parsed as `HH:MM`.
    #[error("invalid clock time: {0}")]
    InvalidClockTime(String),

    /// An invalid switch state string was provided.
    #[error("invalid switch state: {0}")]
    InvalidSwitchState(String),

    /// A duration bounded for one actuator class was used with another.
    #[error("expected a {expected} duration, got a {actual} duration")]
    ClassMismatch {
        /// The actuator class the operation requires.
        expected: ActuatorClass,
        /// The actuator class the duration was created for.
        actual: ActuatorClass,
    },
}

/// Errors related to HTTP communication with the controller.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The controller answered with a non-success status code.
    #[error("request failed: HTTP {status} - {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase, if known.
        message: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The session token was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this error means the session token was rejected.
    ///
    /// Callers use this to tell "log in again" apart from a transient
    /// network failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::AuthenticationFailed))
    }
}
