// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Links to the appliance.
//!
//! A [`DeviceLink`] moves complete state snapshots to and from the appliance.
//! It knows nothing about controls or symbolic values, and it never retries:
//! retry policy belongs to the caller.
//!
//! # Implementations
//!
//! - [`HttpLink`]: JSON over HTTP to an appliance gateway (feature `http`)

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpLink};

use std::future::Future;
use std::sync::Arc;

use crate::error::CommunicationError;
use crate::state::DeviceStateSnapshot;

/// Trait for transports that can read and write the appliance's full state.
///
/// Both operations return a complete snapshot. `push_state` returns the state
/// the appliance confirmed, which may differ from what was sent (for example
/// when the appliance clamps a setpoint).
///
/// The returned futures are `Send` so that polling can run on a spawned task.
pub trait DeviceLink: Send + Sync {
    /// Reads the current state.
    ///
    /// # Errors
    ///
    /// Returns `CommunicationError` if the appliance cannot be reached or its
    /// answer is not a complete snapshot.
    fn fetch_state(
        &self,
    ) -> impl Future<Output = Result<DeviceStateSnapshot, CommunicationError>> + Send;

    /// Writes a full state and returns the state the appliance confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CommunicationError` if the write cannot be delivered or the
    /// confirmation is not a complete snapshot.
    fn push_state(
        &self,
        snapshot: &DeviceStateSnapshot,
    ) -> impl Future<Output = Result<DeviceStateSnapshot, CommunicationError>> + Send;
}

impl<L: DeviceLink> DeviceLink for Arc<L> {
    fn fetch_state(
        &self,
    ) -> impl Future<Output = Result<DeviceStateSnapshot, CommunicationError>> + Send {
        (**self).fetch_state()
    }

    fn push_state(
        &self,
        snapshot: &DeviceStateSnapshot,
    ) -> impl Future<Output = Result<DeviceStateSnapshot, CommunicationError>> + Send {
        (**self).push_state(snapshot)
    }
}
