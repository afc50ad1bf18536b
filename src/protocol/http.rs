// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the controller's REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, Transport};

/// Configuration for an HTTP connection to a garden controller.
///
/// Plain connection parameters; each API call is an independent request,
/// there is no persistent connection.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gardor_lib::HttpConfig;
///
/// // Simple configuration
/// let config = HttpConfig::new("192.168.1.60");
///
/// // With all options
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8443)
///     .with_https()
///     .with_token("session-token")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    token: Option<String>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the controller
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If the port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }
        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            token: self.token,
        })
    }
}

/// HTTP client for the controller's REST API.
///
/// Authentication is a bearer token attached to every request; a `401`
/// answer surfaces as [`ProtocolError::AuthenticationFailed`] so callers
/// can invalidate the session.
///
/// # Examples
///
/// ```no_run
/// use gardor_lib::{HttpConfig, protocol::Transport};
///
/// # async fn example() -> Result<(), gardor_lib::error::ProtocolError> {
/// let client = HttpConfig::new("192.168.1.60")
///     .with_token("session-token")
///     .into_client()?;
/// let response = client.get("/api/sensors").await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    /// Creates a client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the controller.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse, ProtocolError> {
        let response = builder.send().await.map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::Status {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received response");

        Ok(ApiResponse::new(body))
    }
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        tracing::debug!(path = %path, "Sending GET");
        self.send(self.request(Method::GET, path)).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ProtocolError> {
        tracing::debug!(path = %path, "Sending POST");
        let mut builder = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.send(builder).await
    }

    async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ProtocolError> {
        tracing::debug!(path = %path, "Sending PUT");
        self.send(self.request(Method::PUT, path).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ProtocolError> {
        tracing::debug!(path = %path, "Sending DELETE");
        self.send(self.request(Method::DELETE, path)).await
    }
}
