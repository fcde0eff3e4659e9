// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeating interval timer owned by the driver

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Fires every period once armed. Disarming releases the interval, so a
/// stopped poller holds no timer at all.
#[derive(Debug, Default)]
pub struct PollTimer {
    interval: Option<Interval>,
}

impl PollTimer {
    pub fn idle() -> Self {
        Self { interval: None }
    }

    /// (Re)arm with the first tick one `period` from now
    pub fn arm(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        // A slow driver skips ticks rather than bursting to catch up
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick; never resolves while disarmed
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
