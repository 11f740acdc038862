// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `airco_sync` library.
//!
//! Two kinds of failure exist: talking to the appliance can fail
//! ([`CommunicationError`]), and input from the user-facing layer can be
//! invalid ([`ValidationError`]). Neither is fatal. Poll failures are logged
//! and retried on the next tick; write failures are returned to the caller.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The appliance could not be reached or answered with garbage.
    #[error("communication error: {0}")]
    Communication(#[from] CommunicationError),

    /// A control change or setting was rejected before reaching the device.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns `true` if retrying the same operation later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Communication(_))
    }
}

/// Errors raised while exchanging a state snapshot with the appliance.
///
/// Every failure of a [`DeviceLink`](crate::link::DeviceLink) surfaces as one
/// of these variants. All of them are transient from the core's point of view.
#[derive(Debug, Error)]
pub enum CommunicationError {
    /// HTTP transport failure not covered by a more specific variant.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance did not answer in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The appliance or its gateway could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response could not be turned into a complete snapshot.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The session with the appliance is no longer accepted.
    #[error("authentication expired")]
    AuthenticationExpired,
}

impl From<serde_json::Error> for CommunicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Errors related to user input and configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The control name is not one of the six known controls.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// The symbolic value is not valid for the control.
    #[error("invalid value {value:?} for control {control}")]
    InvalidValue {
        /// The control the value was submitted for.
        control: String,
        /// The rejected value, as submitted.
        value: String,
    },

    /// The value has the wrong JSON type for the control.
    #[error("control {control} expects a {expected}")]
    TypeMismatch {
        /// The control the value was submitted for.
        control: String,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },

    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
        /// The actual value that was provided.
        actual: f32,
    },

    /// A polling interval must be between one second and one day.
    #[error("polling interval must be between 1 and 86400 seconds, got {0}")]
    InvalidInterval(u64),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
