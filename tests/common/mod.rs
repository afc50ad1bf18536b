// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted in-memory transport for workflow and reconciler tests.
//!
//! Records every call (with a virtual timestamp) and answers from
//! per-endpoint response queues, so tests can assert on exact call
//! ordering and polling cadence without a network. Clones share state,
//! so tests keep a handle after moving one into a `Controller`.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;

use gardor_lib::error::ProtocolError;
use gardor_lib::protocol::{ApiResponse, Transport};

/// One request the transport has seen.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub at: Instant,
}

impl RecordedCall {
    /// `"METHOD path"`, the form tests match on.
    pub fn signature(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Body(String),
    Error(u16),
    Unauthorized,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
}

/// Transport whose answers are scripted per `"METHOD path"` key.
///
/// Responses queue up in order; the last queued response keeps repeating
/// once the queue is down to one entry. Endpoints with no script answer
/// `{}`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON body answer for `METHOD path`.
    pub fn respond(&self, method: &str, path: &str, body: impl Into<String>) {
        self.push(method, path, Scripted::Body(body.into()));
    }

    /// Queues an HTTP error answer for `METHOD path`.
    pub fn fail(&self, method: &str, path: &str, status: u16) {
        self.push(method, path, Scripted::Error(status));
    }

    /// Queues a 401 answer for `METHOD path`.
    pub fn fail_unauthorized(&self, method: &str, path: &str) {
        self.push(method, path, Scripted::Unauthorized);
    }

    /// Returns everything recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().clone()
    }

    /// Returns the `"METHOD path"` sequence recorded so far.
    pub fn call_signatures(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .iter()
            .map(RecordedCall::signature)
            .collect()
    }

    /// Returns the timestamps of calls matching a signature.
    pub fn times_of(&self, signature: &str) -> Vec<Instant> {
        self.inner
            .calls
            .lock()
            .iter()
            .filter(|call| call.signature() == signature)
            .map(|call| call.at)
            .collect()
    }

    /// Forgets recorded calls, keeping the scripted responses.
    pub fn clear_calls(&self) {
        self.inner.calls.lock().clear();
    }

    fn push(&self, method: &str, path: &str, response: Scripted) {
        self.inner
            .responses
            .lock()
            .entry(format!("{method} {path}"))
            .or_default()
            .push_back(response);
    }

    fn answer(
        &self,
        method: &'static str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        self.inner.calls.lock().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            at: Instant::now(),
        });

        let key = format!("{method} {path}");
        let mut responses = self.inner.responses.lock();
        let scripted = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match scripted {
            None => Ok(ApiResponse::new("{}".to_string())),
            Some(Scripted::Body(body)) => Ok(ApiResponse::new(body)),
            Some(Scripted::Error(status)) => Err(ProtocolError::Status {
                status,
                message: "scripted failure".to_string(),
            }),
            Some(Scripted::Unauthorized) => Err(ProtocolError::AuthenticationFailed),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        self.answer("GET", path, None)
    }

    async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        self.answer("POST", path, body)
    }

    async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ProtocolError> {
        self.answer("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        self.answer("DELETE", path, None)
    }
}
