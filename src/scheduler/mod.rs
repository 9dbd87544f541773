//! Repeating update timer
//!
//! The scheduler is either stopped or running one timer task. Starting while
//! running replaces the timer, so there is never more than one ticking.

pub(crate) mod updater;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::consts::MAX_INTERVAL_SECS;

pub(crate) use updater::{NoteUpdater, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchedulerState {
    Stopped,
    Running { interval_secs: u64 },
}

struct ActiveTimer {
    interval_secs: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub(crate) struct Scheduler {
    updater: Arc<NoteUpdater>,
    active: Option<ActiveTimer>,
}

impl Scheduler {
    pub(crate) fn new(updater: Arc<NoteUpdater>) -> Self {
        Self {
            updater,
            active: None,
        }
    }

    pub(crate) fn state(&self) -> SchedulerState {
        match &self.active {
            Some(timer) => SchedulerState::Running {
                interval_secs: timer.interval_secs,
            },
            None => SchedulerState::Stopped,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn updater(&self) -> &Arc<NoteUpdater> {
        &self.updater
    }

    /// (Re)start ticking every `interval_secs`. The first tick fires one full
    /// period from now; a previous timer is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn start(&mut self, interval_secs: u64) {
        self.stop();

        let interval_secs = interval_secs.clamp(1, MAX_INTERVAL_SECS);
        let period = Duration::from_secs(interval_secs);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_timer(
            Arc::clone(&self.updater),
            period,
            cancel.clone(),
        ));

        info!(interval_secs, "auto-update started");
        self.active = Some(ActiveTimer {
            interval_secs,
            cancel,
            handle,
        });
    }

    /// Cancel the timer. A tick already in progress runs to completion.
    pub(crate) fn stop(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.cancel.cancel();
            info!(interval_secs = timer.interval_secs, "auto-update stopped");
        }
    }

    /// Stop and wait until the timer task has exited
    pub(crate) async fn shutdown(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.cancel.cancel();
            if let Err(e) = timer.handle.await {
                warn!(error = %e, "timer task ended abnormally");
            }
            info!(interval_secs = timer.interval_secs, "auto-update shut down");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.cancel.cancel();
        }
    }
}

async fn run_timer(updater: Arc<NoteUpdater>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("timer cancelled");
                break;
            }
            _ = ticker.tick() => {
                // Synchronous: cancellation can only land between ticks
                updater.on_tick();
            }
        }
    }
}
