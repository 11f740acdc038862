// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound side of the synchronization core.
//!
//! A [`Publisher`] receives one call per observable for every snapshot the
//! reconciler has seen, fetched or pushed. Two implementations ship with the
//! crate: [`CallbackRegistry`](crate::subscription::CallbackRegistry) and
//! [`EventBus`](crate::event::EventBus).

use std::sync::Arc;

use crate::codec::{self, Diagnostic};
use crate::error::CommunicationError;
use crate::state::{ControlUpdate, DeviceStateSnapshot};

/// Receiver of decoded control values.
///
/// Implementations must be cheap and must not block: they are called while
/// the reconciler is between two device round-trips.
pub trait Publisher: Send + Sync {
    /// Updates one observable.
    fn publish(&self, update: &ControlUpdate);

    /// Called once per snapshot that could not be fully decoded.
    ///
    /// The diagnostic is advisory; every other observable has already been
    /// published. The default implementation ignores it.
    fn report_diagnostic(&self, diagnostic: &Diagnostic) {
        let _ = diagnostic;
    }

    /// Called when a poll failed. The default implementation ignores it.
    fn report_poll_failure(&self, error: &CommunicationError) {
        let _ = error;
    }
}

impl<P: Publisher + ?Sized> Publisher for Arc<P> {
    fn publish(&self, update: &ControlUpdate) {
        (**self).publish(update);
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic) {
        (**self).report_diagnostic(diagnostic);
    }

    fn report_poll_failure(&self, error: &CommunicationError) {
        (**self).report_poll_failure(error);
    }
}

/// Decodes `snapshot` and hands every value to `publisher`.
///
/// An unsupported mode is logged at warn level and reported once; it never
/// stops the other observables from being published.
pub fn publish_snapshot<P: Publisher + ?Sized>(
    publisher: &P,
    device: &str,
    snapshot: &DeviceStateSnapshot,
) {
    tracing::debug!(device, ?snapshot, "Publishing state");

    let decoded = codec::decode(snapshot);
    for update in &decoded.updates {
        publisher.publish(update);
    }

    if let Some(diagnostic) = decoded.diagnostic {
        tracing::warn!(device, %diagnostic, "Mode not published");
        publisher.report_diagnostic(&diagnostic);
    }
}
