// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for air conditioner state.
//!
//! Each field the appliance reports as an enumeration comes in two flavours:
//! a *native* type that mirrors the appliance's numeric codes, and a
//! *symbolic* type with the values the user-facing controls offer.
//!
//! # Types
//!
//! - [`OperationalMode`] / [`ThermostatMode`] - Operating mode
//! - [`FanSpeed`] / [`FanSetting`] - Fan speed
//! - [`SwingMode`] / [`SwingSetting`] - Louver swing
//! - [`TargetTemperature`] - Validated setpoint (16-30 °C)

mod fan;
mod mode;
mod swing;
mod temperature;

pub use fan::{FanSetting, FanSpeed};
pub use mode::{OperationalMode, ThermostatMode};
pub use swing::{SwingMode, SwingSetting};
pub use temperature::TargetTemperature;
