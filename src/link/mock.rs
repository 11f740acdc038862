// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory appliance used by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::CommunicationError;
use crate::link::DeviceLink;
use crate::state::DeviceStateSnapshot;
use crate::types::{FanSpeed, OperationalMode, SwingMode};

/// Snapshot of a running unit in cool mode.
pub(crate) fn cooling_snapshot() -> DeviceStateSnapshot {
    DeviceStateSnapshot {
        power_on: true,
        operational_mode: OperationalMode::Cool,
        target_temperature: 22.0,
        indoor_temperature: 25.0,
        outdoor_temperature: Some(30.0),
        turbo_mode: false,
        fan_speed: FanSpeed::Auto,
        swing_mode: SwingMode::Off,
    }
}

/// Appliance that keeps its state in memory and records every call.
pub(crate) struct MockLink {
    state: Mutex<DeviceStateSnapshot>,
    pushed: Mutex<Vec<DeviceStateSnapshot>>,
    confirmation: Mutex<Option<DeviceStateSnapshot>>,
    fetches: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_push: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
    fetch_started: Notify,
}

impl MockLink {
    pub(crate) fn new(state: DeviceStateSnapshot) -> Self {
        Self {
            state: Mutex::new(state),
            pushed: Mutex::new(Vec::new()),
            confirmation: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_push: AtomicBool::new(false),
            gate: Mutex::new(None),
            fetch_started: Notify::new(),
        }
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn pushed(&self) -> Vec<DeviceStateSnapshot> {
        self.pushed.lock().clone()
    }

    pub(crate) fn set_state(&self, state: DeviceStateSnapshot) {
        *self.state.lock() = state;
    }

    pub(crate) fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_pushes(&self, fail: bool) {
        self.fail_push.store(fail, Ordering::SeqCst);
    }

    /// Makes the next push answer with `snapshot` instead of echoing.
    pub(crate) fn confirm_with(&self, snapshot: DeviceStateSnapshot) {
        *self.confirmation.lock() = Some(snapshot);
    }

    /// Holds the next fetch until the returned handle is notified.
    pub(crate) fn hold_next_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Resolves once a fetch has been entered.
    pub(crate) async fn fetch_entered(&self) {
        self.fetch_started.notified().await;
    }
}

impl DeviceLink for MockLink {
    async fn fetch_state(&self) -> Result<DeviceStateSnapshot, CommunicationError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetch_started.notify_one();

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(CommunicationError::Timeout(10_000));
        }
        Ok(self.state.lock().clone())
    }

    async fn push_state(
        &self,
        snapshot: &DeviceStateSnapshot,
    ) -> Result<DeviceStateSnapshot, CommunicationError> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(CommunicationError::ConnectionFailed(
                "appliance unreachable".to_string(),
            ));
        }
        self.pushed.lock().push(snapshot.clone());

        let confirmed = self
            .confirmation
            .lock()
            .take()
            .unwrap_or_else(|| snapshot.clone());
        *self.state.lock() = confirmed.clone();
        Ok(confirmed)
    }
}
