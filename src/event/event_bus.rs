// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting device events.

use tokio::sync::broadcast;

use super::DeviceEvent;
use crate::codec::Diagnostic;
use crate::error::CommunicationError;
use crate::publish::Publisher;
use crate::state::ControlUpdate;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts [`DeviceEvent`]s to any number of subscribers.
///
/// # Capacity
///
/// The bus has a fixed capacity (default 256). A subscriber that falls
/// behind loses the oldest events and gets `RecvError::Lagged`; publishing
/// never waits for it.
///
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for all events sent after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends an event to all subscribers.
    ///
    /// Without subscribers the event is discarded.
    pub fn send(&self, event: DeviceEvent) {
        // No subscribers is not an error here
        let _ = self.sender.send(event);
    }

    /// Sends an event and returns how many subscribers received it.
    #[must_use]
    pub fn send_counted(&self, event: DeviceEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for EventBus {
    fn publish(&self, update: &ControlUpdate) {
        self.send(DeviceEvent::ControlUpdated(*update));
    }

    fn report_diagnostic(&self, diagnostic: &Diagnostic) {
        self.send(DeviceEvent::Diagnostic(*diagnostic));
    }

    fn report_poll_failure(&self, error: &CommunicationError) {
        self.send(DeviceEvent::PollFailed(error.to_string()));
    }
}
