// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing controls.
//!
//! - [`Control`] names one of the six settable controls.
//! - [`ControlChange`] is a request to set one control, coming from the user.
//! - [`ControlUpdate`] is a value going out to observers after a snapshot has
//!   been decoded. Besides the six controls it carries the two read-only
//!   temperature readings.
//!
//! # Examples
//!
//! ```
//! use airco_sync::state::{Control, ControlChange};
//! use airco_sync::types::ThermostatMode;
//! use serde_json::json;
//!
//! let change = ControlChange::parse("mode", &json!("cool")).unwrap();
//! assert_eq!(change, ControlChange::Mode(ThermostatMode::Cool));
//! assert_eq!(change.control(), Control::Mode);
//!
//! assert!(ControlChange::parse("fan_speed", &json!("warp")).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{FanSetting, SwingSetting, TargetTemperature, ThermostatMode};

/// One of the six settable controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// On/off switch.
    Power,
    /// Setpoint.
    TargetTemperature,
    /// Thermostat mode (off/auto/cool/heat).
    Mode,
    /// Turbo.
    Boost,
    /// Fan speed.
    FanSpeed,
    /// Louver swing.
    SwingMode,
}

impl Control {
    /// All controls, in the order they are published.
    pub const ALL: [Self; 6] = [
        Self::Power,
        Self::Mode,
        Self::Boost,
        Self::TargetTemperature,
        Self::FanSpeed,
        Self::SwingMode,
    ];

    /// Returns the control's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::TargetTemperature => "target_temperature",
            Self::Mode => "mode",
            Self::Boost => "boost",
            Self::FanSpeed => "fan_speed",
            Self::SwingMode => "swing_mode",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Control {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(Self::Power),
            "target_temperature" => Ok(Self::TargetTemperature),
            "mode" => Ok(Self::Mode),
            "boost" => Ok(Self::Boost),
            "fan_speed" => Ok(Self::FanSpeed),
            "swing_mode" => Ok(Self::SwingMode),
            _ => Err(ValidationError::UnknownControl(s.to_string())),
        }
    }
}

/// A request to set a single control.
///
/// Values are validated when the change is built, so applying a change to a
/// snapshot can never fail.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlChange {
    /// Switch the appliance on or off.
    Power(bool),
    /// Change the setpoint.
    TargetTemperature(TargetTemperature),
    /// Change the thermostat mode.
    Mode(ThermostatMode),
    /// Enable or disable turbo.
    Boost(bool),
    /// Change the fan speed.
    FanSpeed(FanSetting),
    /// Change the louver swing.
    SwingMode(SwingSetting),
}

impl ControlChange {
    /// Builds a change from a control name and a loosely typed value, as
    /// submitted by a UI or automation layer.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the control is unknown, the value has
    /// the wrong type, the symbolic value is not in the control's table, or
    /// the setpoint is out of range.
    pub fn parse(control: &str, value: &Value) -> Result<Self, ValidationError> {
        let control: Control = control.parse()?;

        match control {
            Control::Power => expect_bool(control, value).map(Self::Power),
            Control::Boost => expect_bool(control, value).map(Self::Boost),
            Control::TargetTemperature => {
                let celsius = value
                    .as_f64()
                    .ok_or_else(|| ValidationError::TypeMismatch {
                        control: control.to_string(),
                        expected: "number",
                    })?;
                // Setpoints are small; precision loss is irrelevant here
                #[allow(clippy::cast_possible_truncation)]
                let celsius = celsius as f32;
                TargetTemperature::new(celsius).map(Self::TargetTemperature)
            }
            Control::Mode => expect_str(control, value)?.parse().map(Self::Mode),
            Control::FanSpeed => expect_str(control, value)?.parse().map(Self::FanSpeed),
            Control::SwingMode => expect_str(control, value)?.parse().map(Self::SwingMode),
        }
    }

    /// Returns the control this change targets.
    #[must_use]
    pub const fn control(&self) -> Control {
        match self {
            Self::Power(_) => Control::Power,
            Self::TargetTemperature(_) => Control::TargetTemperature,
            Self::Mode(_) => Control::Mode,
            Self::Boost(_) => Control::Boost,
            Self::FanSpeed(_) => Control::FanSpeed,
            Self::SwingMode(_) => Control::SwingMode,
        }
    }
}

impl fmt::Display for ControlChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(on) | Self::Boost(on) => write!(f, "{}={on}", self.control()),
            Self::TargetTemperature(t) => write!(f, "{}={t}", self.control()),
            Self::Mode(mode) => write!(f, "{}={mode}", self.control()),
            Self::FanSpeed(speed) => write!(f, "{}={speed}", self.control()),
            Self::SwingMode(swing) => write!(f, "{}={swing}", self.control()),
        }
    }
}

fn expect_bool(control: Control, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::TypeMismatch {
            control: control.to_string(),
            expected: "boolean",
        })
}

fn expect_str(control: Control, value: &Value) -> Result<&str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::TypeMismatch {
            control: control.to_string(),
            expected: "string",
        })
}

/// A symbolic value published to observers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "observable", content = "value", rename_all = "snake_case")]
pub enum ControlUpdate {
    /// Appliance on/off.
    Power(bool),
    /// Setpoint in degrees Celsius.
    TargetTemperature(f32),
    /// Thermostat mode.
    Mode(ThermostatMode),
    /// Turbo.
    Boost(bool),
    /// Fan speed.
    FanSpeed(FanSetting),
    /// Louver swing.
    SwingMode(SwingSetting),
    /// Measured room temperature.
    IndoorTemperature(f32),
    /// Measured outdoor temperature.
    OutdoorTemperature(f32),
}

impl ControlUpdate {
    /// Returns the settable control this update belongs to, or `None` for
    /// the read-only temperature readings.
    #[must_use]
    pub const fn control(&self) -> Option<Control> {
        match self {
            Self::Power(_) => Some(Control::Power),
            Self::TargetTemperature(_) => Some(Control::TargetTemperature),
            Self::Mode(_) => Some(Control::Mode),
            Self::Boost(_) => Some(Control::Boost),
            Self::FanSpeed(_) => Some(Control::FanSpeed),
            Self::SwingMode(_) => Some(Control::SwingMode),
            Self::IndoorTemperature(_) | Self::OutdoorTemperature(_) => None,
        }
    }

    /// Returns the name of the observable this update targets.
    #[must_use]
    pub const fn observable(&self) -> &'static str {
        match self.control() {
            Some(control) => control.as_str(),
            None => match self {
                Self::OutdoorTemperature(_) => "outdoor_temperature",
                _ => "indoor_temperature",
            },
        }
    }

    /// Returns `true` for the read-only temperature readings.
    #[must_use]
    pub const fn is_reading(&self) -> bool {
        self.control().is_none()
    }
}
