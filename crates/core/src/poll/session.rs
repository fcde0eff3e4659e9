// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll session state machine
//!
//! Pure and synchronous: every input is a [`PollEvent`], every side effect
//! is returned as a [`PollEffect`] for the driver to perform. Time only
//! enters through the injected [`Clock`], so the whole lifecycle can be
//! exercised against a `FakeClock`.

use super::{AttemptKind, FetchOutcome, Notice, PollEffect, PollEvent, PollState, StopReason};
use crate::clock::Clock;
use crate::error::FetchError;
use crate::id::{AttemptId, SessionId};
use crate::settings::PollSettings;
use crate::stop::StopCondition;
use std::time::Instant;

/// The one fetch allowed to mutate session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveAttempt {
    pub id: AttemptId,
    pub kind: AttemptKind,
    /// Scheduled attempt that spent the last slot of the budget
    pub is_final: bool,
}

/// State of one poller across its sessions
#[derive(Debug, Clone)]
pub struct PollSession<T> {
    /// Current (or most recent) session; `None` before the first start
    pub id: Option<SessionId>,
    pub attempts: u32,
    pub consecutive_errors: u32,
    pub last_result: Option<T>,
    pub last_error: Option<FetchError>,
    pub stop_reason: Option<StopReason>,
    pub started_at: Option<Instant>,
    active: bool,
    paused: bool,
    live: Option<LiveAttempt>,
    next_attempt: AttemptId,
    settings: PollSettings,
    stop_condition: Option<StopCondition<T>>,
}

impl<T: Clone> PollSession<T> {
    /// Create a poller that has not started yet
    pub fn new(settings: PollSettings, stop_condition: Option<StopCondition<T>>) -> Self {
        Self {
            id: None,
            attempts: 0,
            consecutive_errors: 0,
            last_result: None,
            last_error: None,
            stop_reason: None,
            started_at: None,
            active: false,
            paused: false,
            live: None,
            next_attempt: AttemptId(0),
            settings,
            stop_condition,
        }
    }

    pub fn state(&self) -> PollState {
        if !self.active {
            PollState::Stopped
        } else if self.paused {
            PollState::Paused
        } else if self.live.is_some() {
            PollState::FetchInFlight
        } else {
            PollState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A fetch is outstanding (scheduled or out-of-band)
    pub fn is_loading(&self) -> bool {
        self.live.is_some()
    }

    pub fn live_attempt(&self) -> Option<LiveAttempt> {
        self.live
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Pure state transition returning new state and effects
    pub fn transition(&self, event: PollEvent<T>, clock: &impl Clock) -> (Self, Vec<PollEffect>) {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match (self.state(), event) {
            (PollState::Stopped, PollEvent::Start { session_id }) => {
                next.begin(session_id, clock, &mut effects);
            }
            // Already active: start() is a no-op
            (_, PollEvent::Start { .. }) => {}

            // A tick that raced with stop
            (PollState::Stopped, PollEvent::Tick) => {}
            (_, PollEvent::Tick) => next.tick(clock, &mut effects),

            (_, PollEvent::Refetch) => next.issue(AttemptKind::OutOfBand, false, &mut effects),

            (_, PollEvent::Settled { attempt, outcome }) => {
                next.settle(attempt, outcome, &mut effects);
            }

            (_, PollEvent::Hidden) => {
                if self.settings.pause_on_hidden {
                    next.paused = true;
                }
            }
            (_, PollEvent::Visible) => {
                if self.paused {
                    next.paused = false;
                    if self.active {
                        // Catch up right away rather than waiting for the next tick
                        next.issue(AttemptKind::OutOfBand, false, &mut effects);
                    }
                }
            }

            // Idempotent: only drop a leftover "check again" fetch
            (PollState::Stopped, PollEvent::Stop | PollEvent::Shutdown) => {
                next.cancel_live(&mut effects);
            }
            (_, PollEvent::Stop) => next.finish(StopReason::Requested, &mut effects),
            (_, PollEvent::Shutdown) => next.finish(StopReason::Shutdown, &mut effects),
        }

        (next, effects)
    }

    fn begin(&mut self, session_id: SessionId, clock: &impl Clock, effects: &mut Vec<PollEffect>) {
        self.cancel_live(effects);
        self.id = Some(session_id);
        self.attempts = 0;
        self.consecutive_errors = 0;
        self.stop_reason = None;
        self.started_at = Some(clock.now());
        self.active = true;

        effects.push(PollEffect::StartTimer {
            interval: self.settings.interval,
        });
        // Attempt 0 goes out immediately, not one interval later
        self.tick(clock, effects);
    }

    fn tick(&mut self, clock: &impl Clock, effects: &mut Vec<PollEffect>) {
        if let (Some(deadline), Some(started_at)) = (self.settings.deadline, self.started_at) {
            if clock.now().saturating_duration_since(started_at) >= deadline {
                self.finish(StopReason::DeadlineElapsed, effects);
                return;
            }
        }

        if self.paused {
            return;
        }

        // The final attempt was superseded, cancelled or is still pending
        if self.attempts >= self.settings.max_attempts {
            self.give_up(effects);
            return;
        }

        self.attempts += 1;
        let is_final = self.attempts == self.settings.max_attempts;
        self.issue(AttemptKind::Scheduled, is_final, effects);
    }

    fn issue(&mut self, kind: AttemptKind, is_final: bool, effects: &mut Vec<PollEffect>) {
        // Cancel first so the old token is dead before the new one exists
        self.cancel_live(effects);

        let id = self.next_attempt;
        self.next_attempt = id.next();
        self.live = Some(LiveAttempt { id, kind, is_final });
        effects.push(PollEffect::Fetch { attempt: id, kind });
    }

    fn settle(&mut self, attempt: AttemptId, outcome: FetchOutcome<T>, effects: &mut Vec<PollEffect>) {
        let Some(live) = self.live.filter(|live| live.id == attempt) else {
            tracing::debug!(%attempt, "discarding outcome of superseded attempt");
            return;
        };
        self.live = None;

        match outcome {
            FetchOutcome::Cancelled => {}
            FetchOutcome::Failed(error) if error.is_cancellation() => {}

            FetchOutcome::Succeeded(value) => {
                let condition_met = self
                    .stop_condition
                    .as_ref()
                    .is_some_and(|condition| condition.is_met(&value));
                self.last_result = Some(value);
                self.last_error = None;
                effects.push(PollEffect::Notify(Notice::Success));

                if !self.active {
                    return;
                }
                self.consecutive_errors = 0;
                if condition_met {
                    self.finish(StopReason::ConditionMet, effects);
                } else if live.is_final {
                    self.give_up(effects);
                }
            }

            FetchOutcome::Failed(error) => {
                self.last_error = Some(error);
                effects.push(PollEffect::Notify(Notice::Error));

                if !self.active {
                    return;
                }
                self.consecutive_errors += 1;
                if self.consecutive_errors >= self.settings.max_consecutive_errors {
                    self.finish(StopReason::MaxConsecutiveErrors, effects);
                } else if live.is_final {
                    self.give_up(effects);
                }
            }
        }
    }

    fn give_up(&mut self, effects: &mut Vec<PollEffect>) {
        effects.push(PollEffect::Notify(Notice::MaxAttemptsReached));
        self.finish(StopReason::MaxAttempts, effects);
    }

    fn finish(&mut self, reason: StopReason, effects: &mut Vec<PollEffect>) {
        self.active = false;
        self.stop_reason = Some(reason);
        self.cancel_live(effects);
        effects.push(PollEffect::CancelTimer);
        effects.push(PollEffect::Notify(Notice::Stopped(reason)));
    }

    fn cancel_live(&mut self, effects: &mut Vec<PollEffect>) {
        if let Some(live) = self.live.take() {
            effects.push(PollEffect::CancelFetch { attempt: live.id });
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
