// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::PollInterval;
use crate::link::DeviceLink;
use crate::publish::Publisher;
use crate::reconciler::Reconciler;

/// Owns the timer task that drives [`Reconciler::fetch_and_publish`].
///
/// At most one timer runs at a time. The first tick fires one interval after
/// the timer is armed, and ticks missed while a cycle was running are
/// dropped, not queued.
///
/// Dropping the scheduler stops the timer.
#[derive(Debug, Default)]
pub struct Scheduler {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Creates a stopped scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts polling `reconciler` every `interval`.
    ///
    /// A timer that is already running is cancelled first, so calling this
    /// twice is the same as [`reconfigure`](Self::reconfigure).
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<L, P>(&self, reconciler: Arc<Reconciler<L, P>>, interval: PollInterval)
    where
        L: DeviceLink + 'static,
        P: Publisher + 'static,
    {
        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        tracing::info!(
            device = %reconciler.name(),
            interval_secs = interval.secs(),
            "Polling started"
        );
        *task = Some(tokio::spawn(poll_loop(reconciler, interval)));
    }

    /// Replaces the running timer with one ticking every `interval`.
    ///
    /// The old timer is cancelled before the new one is armed. A cycle that
    /// the old timer already started is cancelled with it.
    pub fn reconfigure<L, P>(&self, reconciler: Arc<Reconciler<L, P>>, interval: PollInterval)
    where
        L: DeviceLink + 'static,
        P: Publisher + 'static,
    {
        tracing::info!(
            device = %reconciler.name(),
            interval_secs = interval.secs(),
            "Reconfiguring polling"
        );
        self.start(reconciler, interval);
    }

    /// Stops polling. Writes in progress are not affected.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::info!("Polling stopped");
        }
    }

    /// Returns `true` while a timer is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn poll_loop<L: DeviceLink, P: Publisher>(
    reconciler: Arc<Reconciler<L, P>>,
    interval: PollInterval,
) {
    let period = interval.as_duration();
    let now = Instant::now();
    let start = now.checked_add(period).unwrap_or(now);
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let outcome = reconciler.fetch_and_publish().await;
        tracing::debug!(device = %reconciler.name(), ?outcome, "Poll cycle finished");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::link::mock::{MockLink, cooling_snapshot};
    use crate::publish::testing::RecordingPublisher;
    use crate::state::ControlChange;

    type TestReconciler = Reconciler<Arc<MockLink>, Arc<RecordingPublisher>>;

    fn setup() -> (Arc<TestReconciler>, Arc<MockLink>) {
        let link = Arc::new(MockLink::new(cooling_snapshot()));
        let reconciler = Arc::new(Reconciler::new(
            "test",
            Arc::clone(&link),
            Arc::new(RecordingPublisher::default()),
        ));
        (reconciler, link)
    }

    fn secs(secs: u64) -> PollInterval {
        PollInterval::new(secs).unwrap()
    }

    /// Advances the paused clock and lets spawned tasks run.
    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_interval() {
        let (reconciler, link) = setup();
        let scheduler = Scheduler::new();
        scheduler.start(reconciler, secs(10));

        advance(Duration::from_secs(9)).await;
        assert_eq!(link.fetch_count(), 0);

        advance(Duration::from_secs(1)).await;
        assert_eq!(link.fetch_count(), 1);

        advance(Duration::from_secs(10)).await;
        advance(Duration::from_secs(10)).await;
        assert_eq!(link.fetch_count(), 3);
        assert!(scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn longest_interval_keeps_timer_armed() {
        let (reconciler, link) = setup();
        let scheduler = Scheduler::new();
        scheduler.start(reconciler, PollInterval::MAX);

        advance(Duration::from_millis(1)).await;
        assert!(scheduler.is_running());
        assert_eq!(link.fetch_count(), 0);

        advance(PollInterval::MAX.as_duration()).await;
        assert!(scheduler.is_running());
        assert_eq!(link.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reconfigure_replaces_timer() {
        let (reconciler, link) = setup();
        let scheduler = Scheduler::new();
        scheduler.start(Arc::clone(&reconciler), secs(10));

        advance(Duration::from_secs(10)).await;
        assert_eq!(link.fetch_count(), 1);

        scheduler.reconfigure(reconciler, secs(3));
        for _ in 0..3 {
            advance(Duration::from_secs(3)).await;
        }
        // Three ticks of the new timer; the old one never fires again.
        assert_eq!(link.fetch_count(), 4);

        advance(Duration::from_secs(1)).await;
        assert_eq!(link.fetch_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_timer() {
        let (reconciler, link) = setup();
        let scheduler = Scheduler::new();
        scheduler.start(reconciler, secs(5));

        advance(Duration::from_secs(5)).await;
        assert_eq!(link.fetch_count(), 1);

        scheduler.stop();
        assert!(!scheduler.is_running());
        advance(Duration::from_secs(60)).await;
        assert_eq!(link.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let (reconciler, link) = setup();
        {
            let scheduler = Scheduler::new();
            scheduler.start(reconciler, secs(5));
        }
        advance(Duration::from_secs(60)).await;
        assert_eq!(link.fetch_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_polls_keep_the_timer_alive() {
        let (reconciler, link) = setup();
        link.fail_fetches(true);
        let scheduler = Scheduler::new();
        scheduler.start(Arc::clone(&reconciler), secs(2));

        advance(Duration::from_secs(2)).await;
        advance(Duration::from_secs(2)).await;
        assert_eq!(link.fetch_count(), 2);
        assert!(scheduler.is_running());
        assert!(!reconciler.is_busy());

        link.fail_fetches(false);
        advance(Duration::from_secs(2)).await;
        assert_eq!(link.fetch_count(), 3);
        assert_eq!(reconciler.publisher().updates().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_does_not_interrupt_writes() {
        let (reconciler, link) = setup();
        let scheduler = Scheduler::new();
        scheduler.start(Arc::clone(&reconciler), secs(5));

        let gate = link.hold_next_fetch();
        let writer = {
            let reconciler = Arc::clone(&reconciler);
            tokio::spawn(async move { reconciler.apply_change(ControlChange::Power(false)).await })
        };
        link.fetch_entered().await;

        scheduler.stop();
        gate.notify_one();

        let confirmed = writer.await.unwrap().unwrap();
        assert!(!confirmed.power_on);
        assert_eq!(link.pushed().len(), 1);
    }
}
