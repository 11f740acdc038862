// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event stream of one appliance.
//!
//! The [`EventBus`] is a [`Publisher`](crate::publish::Publisher) that turns
//! every published value into a [`DeviceEvent`] on a tokio broadcast channel,
//! so any number of tasks can follow the appliance.
//!
//! # Examples
//!
//! ```
//! use airco_sync::event::{DeviceEvent, EventBus};
//! use airco_sync::publish::Publisher;
//! use airco_sync::state::ControlUpdate;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(&ControlUpdate::Power(true));
//! assert_eq!(
//!     rx.try_recv().unwrap(),
//!     DeviceEvent::ControlUpdated(ControlUpdate::Power(true))
//! );
//! ```

mod device_event;
mod event_bus;

pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
