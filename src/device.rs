// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level handle on one air conditioner.
//!
//! [`AirConditioner`] wires a link, a [`Reconciler`], a [`Scheduler`] and the
//! two bundled publishers together. It is what the user-facing layer holds:
//! it accepts control changes, exposes subscriptions and follows settings
//! changes.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::codec::Diagnostic;
use crate::config::{DeviceSettings, PollInterval};
use crate::error::{CommunicationError, Error};
use crate::event::{DeviceEvent, EventBus};
use crate::link::DeviceLink;
use crate::publish::Publisher;
use crate::reconciler::{CycleOutcome, Reconciler};
use crate::scheduler::Scheduler;
use crate::state::{ControlChange, ControlUpdate, DeviceStateSnapshot};
use crate::subscription::{CallbackRegistry, Sensor, Subscribable, SubscriptionId};
use crate::types::{FanSetting, SwingSetting, ThermostatMode};

/// Fans every publisher call out to the callbacks and the event bus.
#[derive(Debug, Default)]
struct DevicePublisher {
    callbacks: CallbackRegistry,
    events: EventBus,
}

impl Publisher for DevicePublisher {
    fn publish(&self, update: &ControlUpdate) {
        self.callbacks.publish(update);
        self.events.publish(update);
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic) {
        self.callbacks.report_diagnostic(diagnostic);
        self.events.report_diagnostic(diagnostic);
    }

    fn report_poll_failure(&self, error: &CommunicationError) {
        self.events.report_poll_failure(error);
    }
}

/// An air conditioner kept in sync with its published view.
///
/// Polling starts as soon as the handle is created and stops when it is shut
/// down or dropped.
///
/// # Examples
///
/// ```no_run
/// use airco_sync::AirConditioner;
/// use airco_sync::config::DeviceConfig;
/// use airco_sync::subscription::Subscribable;
/// use serde_json::json;
///
/// # async fn example() -> airco_sync::Result<()> {
/// let config = DeviceConfig::new("Living room", "192.168.1.20", "ac-1");
/// let device = AirConditioner::http(&config)?;
///
/// device.on_mode_changed(|mode| println!("mode: {mode}"));
///
/// device.submit_control_change("mode", &json!("cool")).await?;
/// device.submit_control_change("target_temperature", &json!(22.5)).await?;
/// # Ok(())
/// # }
/// ```
pub struct AirConditioner<L: DeviceLink + 'static> {
    reconciler: Arc<Reconciler<L, DevicePublisher>>,
    scheduler: Scheduler,
    interval: Mutex<PollInterval>,
}

impl<L: DeviceLink + 'static> AirConditioner<L> {
    /// Creates a handle for the appliance behind `link` and starts polling it
    /// every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(name: impl Into<String>, link: L, interval: PollInterval) -> Self {
        let reconciler = Arc::new(Reconciler::new(name, link, DevicePublisher::default()));
        let scheduler = Scheduler::new();
        scheduler.start(Arc::clone(&reconciler), interval);

        Self {
            reconciler,
            scheduler,
            interval: Mutex::new(interval),
        }
    }

    /// Returns the appliance name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.reconciler.name()
    }

    /// Returns the link to the appliance.
    pub fn link(&self) -> &L {
        self.reconciler.link()
    }

    /// Sets one control from a loosely typed value.
    ///
    /// `control` is one of `power`, `target_temperature`, `mode`, `boost`,
    /// `fan_speed` or `swing_mode`. Returns the state the appliance
    /// confirmed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the control or value is not accepted;
    /// the appliance is not contacted in that case. Returns
    /// `Error::Communication` if the appliance could not be read or written.
    pub async fn submit_control_change(
        &self,
        control: &str,
        value: &Value,
    ) -> Result<DeviceStateSnapshot, Error> {
        let change = ControlChange::parse(control, value).inspect_err(|e| {
            tracing::warn!(device = %self.name(), control, error = %e, "Rejected control change");
        })?;
        self.apply(change).await
    }

    /// Applies a typed control change. Returns the confirmed state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Communication` if the appliance could not be read or
    /// written.
    pub async fn apply(&self, change: ControlChange) -> Result<DeviceStateSnapshot, Error> {
        Ok(self.reconciler.apply_change(change).await?)
    }

    /// Polls the appliance now, outside the regular schedule.
    pub async fn refresh(&self) -> CycleOutcome {
        self.reconciler.fetch_and_publish().await
    }

    /// Returns `true` while a change is being applied.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.reconciler.is_busy()
    }

    /// Returns the current polling interval.
    #[must_use]
    pub fn poll_interval(&self) -> PollInterval {
        *self.interval.lock()
    }

    /// Changes the polling interval.
    ///
    /// Resumes polling if the handle was shut down.
    pub fn set_poll_interval(&self, interval: PollInterval) {
        let mut current = self.interval.lock();
        *current = interval;
        self.scheduler
            .reconfigure(Arc::clone(&self.reconciler), interval);
    }

    /// Applies settings that changed in the settings store.
    ///
    /// Only keys listed in `changed_keys` are considered.
    pub fn on_settings_changed(&self, settings: &DeviceSettings, changed_keys: &[&str]) {
        if changed_keys.contains(&DeviceSettings::POLLING_INTERVAL)
            && settings.polling_interval != self.poll_interval()
        {
            self.set_poll_interval(settings.polling_interval);
        }
    }

    /// Returns `true` while polling is active.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Stops polling. Changes in progress complete normally.
    pub fn shutdown(&self) {
        self.scheduler.stop();
    }

    /// Returns a receiver for this appliance's events.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<DeviceEvent> {
        self.reconciler.publisher().events.subscribe()
    }

    /// Returns the event bus.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.reconciler.publisher().events
    }

    fn callbacks(&self) -> &CallbackRegistry {
        &self.reconciler.publisher().callbacks
    }
}

#[cfg(feature = "http")]
impl AirConditioner<crate::link::HttpLink> {
    /// Creates a handle for a gateway-hosted appliance and starts polling it.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn http(config: &crate::config::DeviceConfig) -> Result<Self, Error> {
        let link = config.http_config().into_link()?;
        Ok(Self::new(
            config.name.clone(),
            link,
            config.settings.polling_interval,
        ))
    }
}

impl<L: DeviceLink + 'static> Subscribable for AirConditioner<L> {
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks().on_power_changed(callback)
    }

    fn on_target_temperature_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.callbacks().on_target_temperature_changed(callback)
    }

    fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(ThermostatMode) + Send + Sync + 'static,
    {
        self.callbacks().on_mode_changed(callback)
    }

    fn on_boost_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks().on_boost_changed(callback)
    }

    fn on_fan_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(FanSetting) + Send + Sync + 'static,
    {
        self.callbacks().on_fan_speed_changed(callback)
    }

    fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingSetting) + Send + Sync + 'static,
    {
        self.callbacks().on_swing_mode_changed(callback)
    }

    fn on_temperature_reading<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Sensor, f32) + Send + Sync + 'static,
    {
        self.callbacks().on_temperature_reading(callback)
    }

    fn on_diagnostic<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Diagnostic) + Send + Sync + 'static,
    {
        self.callbacks().on_diagnostic(callback)
    }

    fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ControlUpdate) + Send + Sync + 'static,
    {
        self.callbacks().on_update(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks().unsubscribe(id)
    }
}

impl<L: DeviceLink + 'static> std::fmt::Debug for AirConditioner<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirConditioner")
            .field("name", &self.name())
            .field("interval", &self.poll_interval())
            .field("polling", &self.is_polling())
            .finish_non_exhaustive()
    }
}
