// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation between appliance-native state and symbolic control values.
//!
//! [`decode`] turns a [`DeviceStateSnapshot`] into one [`ControlUpdate`] per
//! observable. [`encode`] writes a single [`ControlChange`] into a snapshot.
//! Both are pure.
//!
//! # Mode mapping
//!
//! The thermostat mode is derived from two native fields. When the appliance
//! is off the mode is `off`, whatever `operational_mode` says. When it is on,
//! auto, cool and heat map one-to-one; dry, fan and unset have no symbolic
//! counterpart and produce a [`Diagnostic`] instead of a mode update.
//!
//! Encoding `off` only clears the power flag. The native mode is kept so the
//! appliance resumes in the same mode when switched back on.
//!
//! # Examples
//!
//! ```
//! use airco_sync::codec;
//! use airco_sync::state::{ControlChange, ControlUpdate, DeviceStateSnapshot};
//! use airco_sync::types::{FanSpeed, OperationalMode, SwingMode, ThermostatMode};
//!
//! let snapshot = DeviceStateSnapshot {
//!     power_on: false,
//!     operational_mode: OperationalMode::Heat,
//!     target_temperature: 20.0,
//!     indoor_temperature: 17.0,
//!     outdoor_temperature: None,
//!     turbo_mode: false,
//!     fan_speed: FanSpeed::Auto,
//!     swing_mode: SwingMode::Off,
//! };
//!
//! let decoded = codec::decode(&snapshot);
//! assert!(decoded.updates.contains(&ControlUpdate::Mode(ThermostatMode::Off)));
//!
//! let on = codec::encode(&ControlChange::Mode(ThermostatMode::Cool), snapshot);
//! assert!(on.power_on);
//! assert_eq!(on.operational_mode, OperationalMode::Cool);
//! ```

use std::fmt;

use crate::state::{ControlChange, ControlUpdate, DeviceStateSnapshot};
use crate::types::{
    FanSetting, FanSpeed, OperationalMode, SwingMode, SwingSetting, ThermostatMode,
};

/// Advisory message produced while decoding a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Diagnostic {
    /// The appliance runs in a mode the thermostat cannot show. The mode
    /// control was left untouched.
    UnsupportedMode(OperationalMode),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMode(mode) => write!(f, "thermostat mode '{mode}' not supported"),
        }
    }
}

/// Symbolic view of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedState {
    /// One update per observable, in publishing order.
    pub updates: Vec<ControlUpdate>,
    /// Set when a field could not be mapped; the matching update is absent.
    pub diagnostic: Option<Diagnostic>,
}

/// Decodes a snapshot into symbolic control values.
///
/// The outdoor temperature is only included when the appliance reports one.
#[must_use]
pub fn decode(snapshot: &DeviceStateSnapshot) -> DecodedState {
    let mut updates = Vec::with_capacity(8);
    let mut diagnostic = None;

    updates.push(ControlUpdate::Power(snapshot.power_on));
    match thermostat_mode(snapshot.power_on, snapshot.operational_mode) {
        Ok(mode) => updates.push(ControlUpdate::Mode(mode)),
        Err(native) => diagnostic = Some(Diagnostic::UnsupportedMode(native)),
    }
    updates.push(ControlUpdate::Boost(snapshot.turbo_mode));
    updates.push(ControlUpdate::TargetTemperature(snapshot.target_temperature));
    updates.push(ControlUpdate::IndoorTemperature(snapshot.indoor_temperature));
    if let Some(outdoor) = snapshot.outdoor_temperature {
        updates.push(ControlUpdate::OutdoorTemperature(outdoor));
    }
    updates.push(ControlUpdate::FanSpeed(fan_setting(snapshot.fan_speed)));
    updates.push(ControlUpdate::SwingMode(swing_setting(snapshot.swing_mode)));

    DecodedState {
        updates,
        diagnostic,
    }
}

/// Writes one control change into a snapshot and returns it.
///
/// Only the fields governed by the control are touched. Setting the mode to
/// auto, cool or heat also switches the appliance on.
#[must_use]
pub fn encode(change: &ControlChange, mut snapshot: DeviceStateSnapshot) -> DeviceStateSnapshot {
    match *change {
        ControlChange::Power(on) => snapshot.power_on = on,
        ControlChange::TargetTemperature(target) => {
            snapshot.target_temperature = target.celsius();
        }
        ControlChange::Mode(ThermostatMode::Off) => snapshot.power_on = false,
        ControlChange::Mode(mode) => {
            snapshot.power_on = true;
            snapshot.operational_mode = operational_mode(mode);
        }
        ControlChange::Boost(on) => snapshot.turbo_mode = on,
        ControlChange::FanSpeed(setting) => snapshot.fan_speed = fan_speed(setting),
        ControlChange::SwingMode(setting) => snapshot.swing_mode = swing_mode(setting),
    }
    snapshot
}

/// Maps the power flag and native mode to a thermostat mode.
///
/// Returns the native mode as error when it has no symbolic counterpart.
fn thermostat_mode(
    power_on: bool,
    mode: OperationalMode,
) -> Result<ThermostatMode, OperationalMode> {
    if !power_on {
        return Ok(ThermostatMode::Off);
    }
    match mode {
        OperationalMode::Auto => Ok(ThermostatMode::Auto),
        OperationalMode::Cool => Ok(ThermostatMode::Cool),
        OperationalMode::Heat => Ok(ThermostatMode::Heat),
        OperationalMode::Dry | OperationalMode::Fan | OperationalMode::Unset => Err(mode),
    }
}

/// Native mode for a running thermostat mode. `Off` is handled by the caller.
fn operational_mode(mode: ThermostatMode) -> OperationalMode {
    match mode {
        ThermostatMode::Auto | ThermostatMode::Off => OperationalMode::Auto,
        ThermostatMode::Cool => OperationalMode::Cool,
        ThermostatMode::Heat => OperationalMode::Heat,
    }
}

const fn fan_setting(speed: FanSpeed) -> FanSetting {
    match speed {
        FanSpeed::Auto => FanSetting::Auto,
        FanSpeed::Fixed => FanSetting::Fixed,
        FanSpeed::Silent => FanSetting::Silent,
        FanSpeed::Low => FanSetting::Low,
        FanSpeed::Medium => FanSetting::Medium,
        FanSpeed::High => FanSetting::High,
    }
}

const fn fan_speed(setting: FanSetting) -> FanSpeed {
    match setting {
        FanSetting::Auto => FanSpeed::Auto,
        FanSetting::Fixed => FanSpeed::Fixed,
        FanSetting::Silent => FanSpeed::Silent,
        FanSetting::Low => FanSpeed::Low,
        FanSetting::Medium => FanSpeed::Medium,
        FanSetting::High => FanSpeed::High,
    }
}

const fn swing_setting(mode: SwingMode) -> SwingSetting {
    match mode {
        SwingMode::Off => SwingSetting::Off,
        SwingMode::Vertical => SwingSetting::Vertical,
        SwingMode::Horizontal => SwingSetting::Horizontal,
        SwingMode::Both => SwingSetting::Both,
    }
}

const fn swing_mode(setting: SwingSetting) -> SwingMode {
    match setting {
        SwingSetting::Off => SwingMode::Off,
        SwingSetting::Vertical => SwingMode::Vertical,
        SwingSetting::Horizontal => SwingMode::Horizontal,
        SwingSetting::Both => SwingMode::Both,
    }
}
