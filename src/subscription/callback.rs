// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for control updates.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry that stores callbacks and dispatches
//!   published values to them

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::codec::Diagnostic;
use crate::publish::Publisher;
use crate::state::ControlUpdate;
use crate::types::{FanSetting, SwingSetting, ThermostatMode};

/// Unique identifier for a subscription.
///
/// Returned when a callback is registered and used to unsubscribe later.
/// IDs are unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Temperature sensor a reading comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    /// Room sensor.
    Indoor,
    /// Outdoor unit sensor.
    Outdoor,
}

type BoolCallback = Arc<dyn Fn(bool) + Send + Sync>;
type CelsiusCallback = Arc<dyn Fn(f32) + Send + Sync>;
type ModeCallback = Arc<dyn Fn(ThermostatMode) + Send + Sync>;
type FanCallback = Arc<dyn Fn(FanSetting) + Send + Sync>;
type SwingCallback = Arc<dyn Fn(SwingSetting) + Send + Sync>;
type ReadingCallback = Arc<dyn Fn(Sensor, f32) + Send + Sync>;
type DiagnosticCallback = Arc<dyn Fn(Diagnostic) + Send + Sync>;
type UpdateCallback = Arc<dyn Fn(&ControlUpdate) + Send + Sync>;

type Callbacks<C> = RwLock<HashMap<SubscriptionId, C>>;

/// Registry of per-control callbacks.
///
/// Implements [`Publisher`], so it can be handed straight to a
/// [`Reconciler`](crate::reconciler::Reconciler). Callbacks run synchronously
/// on the task that published the value, in arbitrary order, and must not
/// block.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    power: Callbacks<BoolCallback>,
    target_temperature: Callbacks<CelsiusCallback>,
    mode: Callbacks<ModeCallback>,
    boost: Callbacks<BoolCallback>,
    fan_speed: Callbacks<FanCallback>,
    swing_mode: Callbacks<SwingCallback>,
    readings: Callbacks<ReadingCallback>,
    diagnostics: Callbacks<DiagnosticCallback>,
    /// Receives every update, whatever the control.
    updates: Callbacks<UpdateCallback>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            power: RwLock::default(),
            target_temperature: RwLock::default(),
            mode: RwLock::default(),
            boost: RwLock::default(),
            fan_speed: RwLock::default(),
            swing_mode: RwLock::default(),
            readings: RwLock::default(),
            diagnostics: RwLock::default(),
            updates: RwLock::default(),
        }
    }

    fn insert<C>(&self, callbacks: &Callbacks<C>, callback: C) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        callbacks.write().insert(id, callback);
        id
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for the on/off state.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.insert(&self.power, Arc::new(callback))
    }

    /// Registers a callback for the setpoint, in degrees Celsius.
    pub fn on_target_temperature_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.insert(&self.target_temperature, Arc::new(callback))
    }

    /// Registers a callback for the thermostat mode.
    ///
    /// Not called while the appliance runs in a mode the thermostat cannot
    /// represent; see [`on_diagnostic`](Self::on_diagnostic).
    pub fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(ThermostatMode) + Send + Sync + 'static,
    {
        self.insert(&self.mode, Arc::new(callback))
    }

    /// Registers a callback for boost.
    pub fn on_boost_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.insert(&self.boost, Arc::new(callback))
    }

    /// Registers a callback for the fan speed.
    pub fn on_fan_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(FanSetting) + Send + Sync + 'static,
    {
        self.insert(&self.fan_speed, Arc::new(callback))
    }

    /// Registers a callback for the louver swing.
    pub fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingSetting) + Send + Sync + 'static,
    {
        self.insert(&self.swing_mode, Arc::new(callback))
    }

    /// Registers a callback for indoor and outdoor temperature readings.
    pub fn on_temperature_reading<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Sensor, f32) + Send + Sync + 'static,
    {
        self.insert(&self.readings, Arc::new(callback))
    }

    /// Registers a callback for decode diagnostics.
    pub fn on_diagnostic<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Diagnostic) + Send + Sync + 'static,
    {
        self.insert(&self.diagnostics, Arc::new(callback))
    }

    /// Registers a callback that receives every update.
    pub fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ControlUpdate) + Send + Sync + 'static,
    {
        self.insert(&self.updates, Arc::new(callback))
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.power.write().remove(&id).is_some()
            || self.target_temperature.write().remove(&id).is_some()
            || self.mode.write().remove(&id).is_some()
            || self.boost.write().remove(&id).is_some()
            || self.fan_speed.write().remove(&id).is_some()
            || self.swing_mode.write().remove(&id).is_some()
            || self.readings.write().remove(&id).is_some()
            || self.diagnostics.write().remove(&id).is_some()
            || self.updates.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.power.write().clear();
        self.target_temperature.write().clear();
        self.mode.write().clear();
        self.boost.write().clear();
        self.fan_speed.write().clear();
        self.swing_mode.write().clear();
        self.readings.write().clear();
        self.diagnostics.write().clear();
        self.updates.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Calls every callback registered for `update`'s observable, then the
    /// generic ones.
    pub fn dispatch(&self, update: &ControlUpdate) {
        match *update {
            ControlUpdate::Power(on) => call_all(&self.power, |cb| cb(on)),
            ControlUpdate::TargetTemperature(celsius) => {
                call_all(&self.target_temperature, |cb| cb(celsius));
            }
            ControlUpdate::Mode(mode) => call_all(&self.mode, |cb| cb(mode)),
            ControlUpdate::Boost(on) => call_all(&self.boost, |cb| cb(on)),
            ControlUpdate::FanSpeed(fan) => call_all(&self.fan_speed, |cb| cb(fan)),
            ControlUpdate::SwingMode(swing) => call_all(&self.swing_mode, |cb| cb(swing)),
            ControlUpdate::IndoorTemperature(celsius) => {
                call_all(&self.readings, |cb| cb(Sensor::Indoor, celsius));
            }
            ControlUpdate::OutdoorTemperature(celsius) => {
                call_all(&self.readings, |cb| cb(Sensor::Outdoor, celsius));
            }
        }

        call_all(&self.updates, |cb| cb(update));
    }

    /// Calls every diagnostic callback.
    pub fn dispatch_diagnostic(&self, diagnostic: Diagnostic) {
        call_all(&self.diagnostics, |cb| cb(diagnostic));
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.power.read().len()
            + self.target_temperature.read().len()
            + self.mode.read().len()
            + self.boost.read().len()
            + self.fan_speed.read().len()
            + self.swing_mode.read().len()
            + self.readings.read().len()
            + self.diagnostics.read().len()
            + self.updates.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

/// Invokes each callback in `callbacks` without holding the lock, so a
/// callback may subscribe or unsubscribe.
fn call_all<C: Clone>(callbacks: &Callbacks<C>, invoke: impl Fn(&C)) {
    let snapshot: Vec<C> = callbacks.read().values().cloned().collect();
    for callback in &snapshot {
        invoke(callback);
    }
}

impl Publisher for CallbackRegistry {
    fn publish(&self, update: &ControlUpdate) {
        self.dispatch(update);
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic) {
        self.dispatch_diagnostic(*diagnostic);
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationalMode;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn power_callback_and_unsubscribe() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_power_changed(move |_on| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.publish(&ControlUpdate::Power(true));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.publish(&ControlUpdate::Power(false));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn updates_reach_only_their_control() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(Vec::new()));

        let r = received.clone();
        registry.on_mode_changed(move |mode| r.write().push(format!("mode={mode}")));
        let r = received.clone();
        registry.on_fan_speed_changed(move |fan| r.write().push(format!("fan={fan}")));
        let r = received.clone();
        registry.on_target_temperature_changed(move |t| r.write().push(format!("target={t}")));

        registry.publish(&ControlUpdate::Mode(ThermostatMode::Heat));
        registry.publish(&ControlUpdate::Boost(true));
        registry.publish(&ControlUpdate::FanSpeed(FanSetting::Low));
        registry.publish(&ControlUpdate::TargetTemperature(21.5));

        assert_eq!(
            *received.read(),
            vec!["mode=heat", "fan=low", "target=21.5"]
        );
    }

    #[test]
    fn readings_carry_their_sensor() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(Vec::new()));
        let r = received.clone();
        registry.on_temperature_reading(move |sensor, celsius| r.write().push((sensor, celsius)));

        registry.publish(&ControlUpdate::IndoorTemperature(24.0));
        registry.publish(&ControlUpdate::OutdoorTemperature(31.5));

        assert_eq!(
            *received.read(),
            vec![(Sensor::Indoor, 24.0), (Sensor::Outdoor, 31.5)]
        );
    }

    #[test]
    fn generic_callback_sees_everything() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        registry.on_update(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.publish(&ControlUpdate::Power(true));
        registry.publish(&ControlUpdate::SwingMode(SwingSetting::Both));
        registry.publish(&ControlUpdate::IndoorTemperature(20.0));

        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn diagnostics_dispatched() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(None));
        let r = received.clone();
        registry.on_diagnostic(move |d| *r.write() = Some(d));

        registry.report_diagnostic(&Diagnostic::UnsupportedMode(OperationalMode::Dry));

        assert_eq!(
            *received.read(),
            Some(Diagnostic::UnsupportedMode(OperationalMode::Dry))
        );
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let id_slot = Arc::new(RwLock::new(None));

        let weak = Arc::downgrade(&registry);
        let slot = id_slot.clone();
        let id = registry.on_boost_changed(move |_| {
            if let (Some(registry), Some(id)) = (weak.upgrade(), *slot.read()) {
                registry.unsubscribe(id);
            }
        });
        *id_slot.write() = Some(id);

        registry.publish(&ControlUpdate::Boost(true));
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_unknown_id() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn clear_removes_all() {
        let registry = CallbackRegistry::new();
        registry.on_power_changed(|_| {});
        registry.on_swing_mode_changed(|_| {});
        registry.on_diagnostic(|_| {});
        assert_eq!(registry.callback_count(), 3);

        registry.clear();
        assert!(registry.is_empty());
    }
}
