// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration.
//!
//! [`DeviceConfig`] is what settings storage persists for one appliance. It
//! round-trips through JSON, and invalid values are rejected while
//! deserializing rather than when polling starts.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Polling interval, a whole number of seconds between one second and one
/// day.
///
/// # Examples
///
/// ```
/// use airco_sync::config::PollInterval;
///
/// let interval = PollInterval::new(60).unwrap();
/// assert_eq!(interval.secs(), 60);
/// assert!(PollInterval::new(0).is_err());
/// assert!(PollInterval::new(u64::MAX).is_err());
/// assert_eq!(PollInterval::default().secs(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PollInterval(u64);

impl PollInterval {
    /// Interval used when none is configured.
    pub const DEFAULT: Self = Self(30);

    /// Longest accepted interval.
    pub const MAX: Self = Self(86_400);

    /// Creates an interval of `secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidInterval` if `secs` is zero or
    /// longer than [`MAX`](Self::MAX).
    pub const fn new(secs: u64) -> Result<Self, ValidationError> {
        if secs == 0 || secs > Self::MAX.0 {
            Err(ValidationError::InvalidInterval(secs))
        } else {
            Ok(Self(secs))
        }
    }

    /// Returns the interval in seconds.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0
    }

    /// Returns the interval as a `Duration`.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for PollInterval {
    type Error = ValidationError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<PollInterval> for u64 {
    fn from(interval: PollInterval) -> Self {
        interval.0
    }
}

impl fmt::Display for PollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// User-adjustable settings of one appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// How often the appliance is polled.
    pub polling_interval: PollInterval,
}

impl DeviceSettings {
    /// Settings key of [`polling_interval`](Self::polling_interval).
    pub const POLLING_INTERVAL: &'static str = "polling_interval";
}

/// Persisted configuration of one appliance.
///
/// # Examples
///
/// ```
/// use airco_sync::config::{DeviceConfig, PollInterval};
///
/// let config = DeviceConfig::new("Bedroom", "192.168.1.20", "ac-1")
///     .with_port(8080)
///     .with_credentials("admin", "secret")
///     .with_poll_interval(PollInterval::new(15).unwrap());
///
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DeviceConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(restored, config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Display name, used in logs.
    pub name: String,
    /// Identifier of the appliance on its gateway.
    pub device_id: String,
    /// Gateway host name or address.
    pub host: String,
    /// Gateway port; the scheme's default port when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Whether to use HTTPS.
    #[serde(default)]
    pub use_https: bool,
    /// Gateway user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Gateway password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-adjustable settings.
    #[serde(default)]
    pub settings: DeviceSettings,
}

const fn default_timeout_secs() -> u64 {
    10
}

impl DeviceConfig {
    /// Creates a configuration with default connection options and settings.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            host: host.into(),
            port: None,
            use_https: false,
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            settings: DeviceSettings::default(),
        }
    }

    /// Sets the gateway port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Sets gateway credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: PollInterval) -> Self {
        self.settings.polling_interval = interval;
        self
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the link configuration described by this config.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> crate::link::HttpConfig {
        let mut http = crate::link::HttpConfig::new(&self.host, &self.device_id)
            .with_timeout(self.timeout());
        if let Some(port) = self.port {
            http = http.with_port(port);
        }
        if self.use_https {
            http = http.with_https();
        }
        if let Some(username) = &self.username {
            http = http.with_credentials(username, self.password.clone().unwrap_or_default());
        }
        http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_interval_rejected() {
        assert_eq!(
            PollInterval::new(0),
            Err(ValidationError::InvalidInterval(0))
        );
        assert_eq!(PollInterval::new(1).unwrap().as_duration(), Duration::from_secs(1));
    }

    #[test]
    fn interval_longer_than_a_day_rejected() {
        assert_eq!(PollInterval::new(86_400), Ok(PollInterval::MAX));
        assert_eq!(
            PollInterval::new(86_401),
            Err(ValidationError::InvalidInterval(86_401))
        );
        assert_eq!(
            PollInterval::new(u64::MAX),
            Err(ValidationError::InvalidInterval(u64::MAX))
        );
    }

    #[test]
    fn interval_deserializes_through_validation() {
        let ok: PollInterval = serde_json::from_value(json!(45)).unwrap();
        assert_eq!(ok.secs(), 45);
        assert!(serde_json::from_value::<PollInterval>(json!(0)).is_err());
        assert!(serde_json::from_value::<PollInterval>(json!(-5)).is_err());
        assert!(serde_json::from_value::<PollInterval>(json!(u64::MAX)).is_err());
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: DeviceConfig = serde_json::from_value(json!({
            "name": "Office",
            "device_id": "ac-7",
            "host": "10.0.0.5"
        }))
        .unwrap();

        assert_eq!(config.port, None);
        assert!(!config.use_https);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.settings.polling_interval, PollInterval::DEFAULT);
    }

    #[test]
    fn config_with_zero_interval_rejected() {
        let result = serde_json::from_value::<DeviceConfig>(json!({
            "name": "Office",
            "device_id": "ac-7",
            "host": "10.0.0.5",
            "settings": { "polling_interval": 0 }
        }));
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_from_device_config() {
        let config = DeviceConfig::new("Office", "gateway.local", "ac-7")
            .with_https()
            .with_credentials("admin", "pw")
            .with_timeout_secs(3);

        let http = config.http_config();
        assert_eq!(http.port(), 443);
        assert_eq!(http.timeout(), Duration::from_secs(3));
        assert_eq!(
            http.state_url(),
            "https://gateway.local/api/v1/devices/ac-7/state"
        );
    }

    #[test]
    fn interval_display() {
        assert_eq!(PollInterval::new(90).unwrap().to_string(), "90s");
    }
}
