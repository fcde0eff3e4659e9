// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll states and stop reasons

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a poller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    /// Active, waiting for the next tick with nothing in flight
    Idle,
    /// Active with a scheduled or out-of-band fetch outstanding
    FetchInFlight,
    /// Active but hidden; ticks are skipped until visible again
    Paused,
    /// No active session: never started, or ended
    Stopped,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Idle => write!(f, "idle"),
            PollState::FetchInFlight => write!(f, "fetch_in_flight"),
            PollState::Paused => write!(f, "paused"),
            PollState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `stop()` was called
    Requested,
    /// The stop condition matched a successful result
    ConditionMet,
    /// The last budgeted attempt settled without meeting the stop condition
    MaxAttempts,
    /// Too many back-to-back failures
    MaxConsecutiveErrors,
    /// The optional wall-clock deadline passed
    DeadlineElapsed,
    /// The owning handle was dropped or shut down
    Shutdown,
}

impl StopReason {
    /// True when the session gave up without reaching a terminal result
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            StopReason::MaxAttempts
                | StopReason::MaxConsecutiveErrors
                | StopReason::DeadlineElapsed
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Requested => write!(f, "requested"),
            StopReason::ConditionMet => write!(f, "condition met"),
            StopReason::MaxAttempts => write!(f, "max attempts reached"),
            StopReason::MaxConsecutiveErrors => write!(f, "too many consecutive errors"),
            StopReason::DeadlineElapsed => write!(f, "deadline elapsed"),
            StopReason::Shutdown => write!(f, "shutdown"),
        }
    }
}
