// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state and control types.
//!
//! [`DeviceStateSnapshot`] is the appliance's full state in native terms.
//! [`ControlChange`] and [`ControlUpdate`] carry symbolic values between the
//! user-facing layer and the core.

mod control;
mod snapshot;

pub use control::{Control, ControlChange, ControlUpdate};
pub use snapshot::DeviceStateSnapshot;
