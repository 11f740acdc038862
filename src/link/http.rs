// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP link to an appliance gateway.
//!
//! The gateway speaks the appliance's native protocol and exposes each paired
//! unit as a JSON resource:
//!
//! - `GET  /api/v1/devices/<id>/state` returns the current snapshot
//! - `PUT  /api/v1/devices/<id>/state` writes a snapshot and returns the
//!   confirmed one

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::error::CommunicationError;
use crate::link::DeviceLink;
use crate::state::DeviceStateSnapshot;

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for a gateway-hosted appliance.
///
/// # Examples
///
/// ```
/// use airco_sync::link::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.20", "living-room")
///     .with_port(8080)
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(
///     config.state_url(),
///     "http://192.168.1.20:8080/api/v1/devices/living-room/state"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    device_id: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the appliance `device_id` behind the
    /// gateway at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            device_id: device_id.into(),
            credentials: None,
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
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets basic-auth credentials for the gateway.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the gateway host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the appliance identifier on the gateway.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
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

    /// Builds the URL of the appliance's state resource.
    #[must_use]
    pub fn state_url(&self) -> String {
        format!(
            "{}/api/v1/devices/{}/state",
            self.base_url(),
            urlencoding::encode(&self.device_id)
        )
    }

    /// Creates an `HttpLink` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_link(self) -> Result<HttpLink, CommunicationError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(CommunicationError::Http)?;

        Ok(HttpLink {
            state_url: self.state_url(),
            client,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpLink
// ============================================================================

/// [`DeviceLink`] over the gateway's JSON API.
#[derive(Debug, Clone)]
pub struct HttpLink {
    state_url: String,
    client: Client,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpLink {
    /// Returns the URL of the state resource.
    #[must_use]
    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    async fn execute(
        &self,
        request: RequestBuilder,
    ) -> Result<DeviceStateSnapshot, CommunicationError> {
        let request = match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        };

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CommunicationError::AuthenticationExpired);
        }

        if !status.is_success() {
            return Err(CommunicationError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        tracing::debug!(body = %body, "Received gateway response");

        serde_json::from_str(&body).map_err(Into::into)
    }

    /// Maps transport errors onto the communication taxonomy.
    fn classify(&self, err: reqwest::Error) -> CommunicationError {
        if err.is_timeout() {
            // Safe: timeouts are configured in seconds, far below u64::MAX ms
            #[allow(clippy::cast_possible_truncation)]
            let timeout_ms = self.timeout.as_millis() as u64;
            CommunicationError::Timeout(timeout_ms)
        } else if err.is_connect() {
            CommunicationError::ConnectionFailed(err.to_string())
        } else {
            CommunicationError::Http(err)
        }
    }
}

impl DeviceLink for HttpLink {
    async fn fetch_state(&self) -> Result<DeviceStateSnapshot, CommunicationError> {
        tracing::debug!(url = %self.state_url, "Fetching appliance state");
        self.execute(self.client.get(&self.state_url)).await
    }

    async fn push_state(
        &self,
        snapshot: &DeviceStateSnapshot,
    ) -> Result<DeviceStateSnapshot, CommunicationError> {
        tracing::debug!(url = %self.state_url, ?snapshot, "Pushing appliance state");
        self.execute(self.client.put(&self.state_url).json(snapshot))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.20", "ac-1");
        assert_eq!(config.host(), "192.168.1.20");
        assert_eq!(config.port(), 80);
        assert_eq!(config.device_id(), "ac-1");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.base_url(), "http://192.168.1.20");
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("gateway.local", "ac-1").with_https();
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://gateway.local");
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("gateway.local", "ac-1")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://gateway.local:8443");
    }

    #[test]
    fn state_url_encodes_device_id() {
        let config = HttpConfig::new("gateway.local", "bed room/1");
        assert_eq!(
            config.state_url(),
            "http://gateway.local/api/v1/devices/bed%20room%2F1/state"
        );
    }

    #[test]
    fn into_link_keeps_url_and_credentials() {
        let link = HttpConfig::new("192.168.1.20", "ac-1")
            .with_credentials("user", "pass")
            .into_link()
            .unwrap();
        assert_eq!(
            link.state_url(),
            "http://192.168.1.20/api/v1/devices/ac-1/state"
        );
        assert!(link.credentials.is_some());
    }
}
