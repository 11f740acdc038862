// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full appliance state snapshot.

use crate::types::{FanSpeed, OperationalMode, SwingMode};

/// Complete operating state of the appliance at one instant.
///
/// A snapshot is always complete: there is no way to build one with a
/// missing field, and deserializing a response that lacks a field fails.
/// Only `outdoor_temperature` may be `None`, which means the appliance has no
/// outdoor sensor.
///
/// Snapshots are values. The reconciler obtains a fresh one for every
/// operation and drops it once published.
///
/// # Examples
///
/// ```
/// use airco_sync::state::DeviceStateSnapshot;
/// use airco_sync::types::{FanSpeed, OperationalMode, SwingMode};
///
/// let snapshot = DeviceStateSnapshot {
///     power_on: true,
///     operational_mode: OperationalMode::Cool,
///     target_temperature: 22.0,
///     indoor_temperature: 25.5,
///     outdoor_temperature: Some(31.0),
///     turbo_mode: false,
///     fan_speed: FanSpeed::Auto,
///     swing_mode: SwingMode::Off,
/// };
///
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert_eq!(json["operational_mode"], 2);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceStateSnapshot {
    /// Whether the appliance is running.
    pub power_on: bool,
    /// Selected operating mode; kept while powered off.
    pub operational_mode: OperationalMode,
    /// Setpoint in degrees Celsius.
    pub target_temperature: f32,
    /// Measured room temperature.
    pub indoor_temperature: f32,
    /// Measured outdoor temperature, if the unit has a sensor.
    pub outdoor_temperature: Option<f32>,
    /// Boost mode.
    pub turbo_mode: bool,
    /// Fan speed.
    pub fan_speed: FanSpeed,
    /// Louver swing.
    pub swing_mode: SwingMode,
}

impl DeviceStateSnapshot {
    /// Returns `true` if the appliance is running in a mode the thermostat
    /// cannot represent (dry, fan, or no mode at all).
    #[must_use]
    pub fn has_unsupported_mode(&self) -> bool {
        self.power_on
            && matches!(
                self.operational_mode,
                OperationalMode::Dry | OperationalMode::Fan | OperationalMode::Unset
            )
    }
}
