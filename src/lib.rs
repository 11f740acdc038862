// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `airco_sync` - Keep an air conditioner and its thermostat view in sync.
//!
//! The appliance exposes its state as one full snapshot, read and written as
//! a whole. The user-facing layer deals in individual controls with symbolic
//! values. This crate sits between the two: it polls the appliance, decodes
//! each snapshot into per-control updates, and turns a single control change
//! into a read-modify-write of the full snapshot without ever racing the
//! poll.
//!
//! # Controls
//!
//! | Control              | Values                                               |
//! |----------------------|------------------------------------------------------|
//! | `power`              | `true` / `false`                                     |
//! | `target_temperature` | 16 to 30 °C                                          |
//! | `mode`               | `off`, `auto`, `cool`, `heat`                         |
//! | `boost`              | `true` / `false`                                     |
//! | `fan_speed`          | `auto`, `fixed`, `silent`, `low`, `medium`, `high`   |
//! | `swing_mode`         | `off`, `vertical`, `horizontal`, `both`              |
//!
//! Indoor and outdoor temperatures are published as read-only readings.
//!
//! # Quick Start
//!
//! ```no_run
//! use airco_sync::AirConditioner;
//! use airco_sync::config::{DeviceConfig, PollInterval};
//! use airco_sync::subscription::Subscribable;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> airco_sync::Result<()> {
//!     let config = DeviceConfig::new("Living room", "192.168.1.20", "ac-1")
//!         .with_credentials("admin", "secret")
//!         .with_poll_interval(PollInterval::new(15)?);
//!
//!     // Polling starts right away
//!     let device = AirConditioner::http(&config)?;
//!
//!     device.on_target_temperature_changed(|celsius| {
//!         println!("Setpoint: {celsius}°C");
//!     });
//!
//!     device.submit_control_change("mode", &json!("cool")).await?;
//!     device.submit_control_change("fan_speed", &json!("low")).await?;
//!
//!     device.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # Custom links
//!
//! Anything that can read and write a full [`DeviceStateSnapshot`] can drive
//! a device: implement [`DeviceLink`] and pass it to [`AirConditioner::new`].
//!
//! # Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod codec;
pub mod config;
mod device;
pub mod error;
pub mod event;
pub mod link;
pub mod publish;
pub mod reconciler;
pub mod scheduler;
pub mod state;
pub mod subscription;
pub mod types;

pub use config::{DeviceConfig, DeviceSettings, PollInterval};
pub use device::AirConditioner;
pub use error::{CommunicationError, Error, Result, ValidationError};
pub use link::DeviceLink;
#[cfg(feature = "http")]
pub use link::{HttpConfig, HttpLink};
pub use publish::Publisher;
pub use reconciler::{CycleOutcome, Reconciler};
pub use scheduler::Scheduler;
pub use state::{Control, ControlChange, ControlUpdate, DeviceStateSnapshot};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{
    FanSetting, FanSpeed, OperationalMode, SwingMode, SwingSetting, TargetTemperature,
    ThermostatMode,
};
