// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronization core.
//!
//! The [`Reconciler`] keeps the published view of one appliance in line with
//! the appliance itself. It has two entry points:
//!
//! - [`fetch_and_publish`](Reconciler::fetch_and_publish) is the poll path.
//!   It yields to writes: if a write is in progress the tick is skipped, and
//!   if a write starts while the fetch is in flight the fetched snapshot is
//!   dropped unpublished.
//! - [`apply_change`](Reconciler::apply_change) is the write path. It reads
//!   the current state, changes one control, pushes the result and publishes
//!   what the appliance confirmed. Errors go back to the caller.
//!
//! Writes are serialized among themselves. Polls never wait for anything.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::codec;
use crate::error::CommunicationError;
use crate::link::DeviceLink;
use crate::publish::{Publisher, publish_snapshot};
use crate::state::{ControlChange, DeviceStateSnapshot};

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fresh snapshot was published.
    Published,
    /// A write was in progress; the appliance was not contacted.
    Skipped,
    /// A write started during the fetch; the fetched snapshot was dropped.
    Superseded,
    /// The fetch failed. The error was logged and reported to the publisher.
    Failed,
}

/// Keeps one appliance and its published view in sync.
pub struct Reconciler<L, P> {
    name: String,
    link: L,
    publisher: P,
    /// Number of writes started and not yet finished.
    busy: AtomicUsize,
    /// Bumped when a write starts.
    write_epoch: AtomicU64,
    write_lock: Mutex<()>,
}

impl<L: DeviceLink, P: Publisher> Reconciler<L, P> {
    /// Creates a reconciler for the appliance called `name`.
    pub fn new(name: impl Into<String>, link: L, publisher: P) -> Self {
        Self {
            name: name.into(),
            link,
            publisher,
            busy: AtomicUsize::new(0),
            write_epoch: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the appliance name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the link to the appliance.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Returns the publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Returns `true` while a write is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire) > 0
    }

    /// Runs one poll cycle.
    ///
    /// Never fails: communication errors are logged and passed to
    /// [`Publisher::report_poll_failure`], and the next cycle retries.
    pub async fn fetch_and_publish(&self) -> CycleOutcome {
        if self.is_busy() {
            tracing::debug!(device = %self.name, "Write in progress, skipping poll");
            return CycleOutcome::Skipped;
        }
        let epoch = self.write_epoch.load(Ordering::Acquire);

        let snapshot = match self.link.fetch_state().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(device = %self.name, error = %e, "Poll failed");
                self.publisher.report_poll_failure(&e);
                return CycleOutcome::Failed;
            }
        };

        if self.is_busy() || self.write_epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!(device = %self.name, "Write started during poll, dropping snapshot");
            return CycleOutcome::Superseded;
        }

        publish_snapshot(&self.publisher, &self.name, &snapshot);
        CycleOutcome::Published
    }

    /// Applies one control change to the appliance.
    ///
    /// Reads the current state, rewrites the fields governed by the control,
    /// pushes the result and publishes the state the appliance confirmed.
    ///
    /// # Errors
    ///
    /// Returns the `CommunicationError` of the failing fetch or push. Nothing
    /// is pushed if the fetch fails, and nothing is published on any error.
    pub async fn apply_change(
        &self,
        change: ControlChange,
    ) -> Result<DeviceStateSnapshot, CommunicationError> {
        let _busy = BusyGuard::acquire(&self.busy);
        self.write_epoch.fetch_add(1, Ordering::AcqRel);
        let _write = self.write_lock.lock().await;

        tracing::debug!(device = %self.name, %change, "Applying change");

        let result = self.write(change).await;
        match &result {
            Ok(_) => tracing::info!(device = %self.name, %change, "Change applied"),
            Err(e) => tracing::warn!(device = %self.name, %change, error = %e, "Change failed"),
        }
        result
    }

    async fn write(
        &self,
        change: ControlChange,
    ) -> Result<DeviceStateSnapshot, CommunicationError> {
        let current = self.link.fetch_state().await?;
        let desired = codec::encode(&change, current);
        let confirmed = self.link.push_state(&desired).await?;

        if confirmed != desired {
            tracing::debug!(device = %self.name, ?desired, ?confirmed, "Appliance adjusted the change");
        }

        publish_snapshot(&self.publisher, &self.name, &confirmed);
        Ok(confirmed)
    }
}

impl<L, P> std::fmt::Debug for Reconciler<L, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("name", &self.name)
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Holds the busy count up for the lifetime of one write.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a AtomicUsize) -> Self {
        busy.fetch_add(1, Ordering::AcqRel);
        Self(busy)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
