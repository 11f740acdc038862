// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback subscriptions for control updates.
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - A [`Publisher`](crate::publish::Publisher) that
//!   dispatches each update to the callbacks registered for its control
//! - [`Subscribable`] - Trait for types that support subscriptions
//!
//! For a channel-based alternative see [`EventBus`](crate::event::EventBus).

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, Sensor, SubscriptionId};
pub use subscribable::Subscribable;
