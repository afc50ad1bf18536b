// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the controller's REST API.
//!
//! The controller exposes a small JSON-over-HTTP API. [`HttpClient`] is
//! the production implementation; the [`Transport`] trait is the seam
//! that lets tests substitute a scripted transport and assert on call
//! ordering.

mod http;

pub use http::{HttpClient, HttpConfig};

use crate::error::{ParseError, ProtocolError};

/// Response body from a controller API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The raw JSON response body.
    body: String,
}

impl ApiResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body is empty or cannot be parsed into the
    /// target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        if self.body.trim().is_empty() {
            return Err(ParseError::UnexpectedFormat(
                "empty response body".to_string(),
            ));
        }
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for transports that can reach the controller API.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the controller
    /// answers with a non-success status.
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError>;

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the controller
    /// answers with a non-success status.
    async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError>;

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the controller
    /// answers with a non-success status.
    async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ProtocolError>;

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the controller
    /// answers with a non-success status.
    async fn delete(&self, path: &str) -> Result<ApiResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_typed_body() {
        let response = ApiResponse::new(r#"{"minutes": 15}"#.to_string());
        let value: serde_json::Value = response.parse().unwrap();
        assert_eq!(value["minutes"], 15);
    }

    #[test]
    fn parse_empty_body_is_an_error() {
        let response = ApiResponse::new(String::new());
        let err = response.parse::<serde_json::Value>().unwrap_err();
        assert!(err.to_string().contains("empty response body"));
    }
}
