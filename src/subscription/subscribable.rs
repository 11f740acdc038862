// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that publish control updates.

use crate::codec::Diagnostic;
use crate::state::ControlUpdate;
use crate::subscription::{Sensor, SubscriptionId};
use crate::types::{FanSetting, SwingSetting, ThermostatMode};

/// Trait for types that support control subscriptions.
///
/// Callbacks fire every time a value is published, which happens once per
/// poll cycle and once per applied change, whether or not the value differs
/// from the previous one.
///
/// # Examples
///
/// ```no_run
/// use airco_sync::AirConditioner;
/// use airco_sync::config::DeviceConfig;
/// use airco_sync::subscription::Subscribable;
///
/// # async fn example() -> airco_sync::Result<()> {
/// let config = DeviceConfig::new("Bedroom", "192.168.1.20", "ac-1");
/// let device = AirConditioner::http(&config)?;
///
/// let sub_id = device.on_target_temperature_changed(|celsius| {
///     println!("Setpoint is now {celsius}°C");
/// });
///
/// device.on_mode_changed(|mode| {
///     println!("Mode: {mode}");
/// });
///
/// device.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to the on/off state.
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static;

    /// Subscribes to the setpoint, in degrees Celsius.
    fn on_target_temperature_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(f32) + Send + Sync + 'static;

    /// Subscribes to the thermostat mode.
    fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(ThermostatMode) + Send + Sync + 'static;

    /// Subscribes to boost.
    fn on_boost_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static;

    /// Subscribes to the fan speed.
    fn on_fan_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(FanSetting) + Send + Sync + 'static;

    /// Subscribes to the louver swing.
    fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingSetting) + Send + Sync + 'static;

    /// Subscribes to temperature readings.
    fn on_temperature_reading<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Sensor, f32) + Send + Sync + 'static;

    /// Subscribes to decode diagnostics, such as an unsupported mode.
    fn on_diagnostic<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Diagnostic) + Send + Sync + 'static;

    /// Subscribes to every update.
    fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ControlUpdate) + Send + Sync + 'static;

    /// Removes a subscription.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
