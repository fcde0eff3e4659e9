// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects requested by the poll state machine

use super::StopReason;
use crate::id::AttemptId;
use std::time::Duration;

/// Whether a fetch belongs to the schedule or was requested out of band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    /// Issued by a tick; counts toward `max_attempts`
    Scheduled,
    /// Issued by refetch or visibility resume; counts toward nothing
    OutOfBand,
}

/// Notifications for the caller's callbacks.
///
/// Payloads are read from the session after the transition, so callbacks
/// only ever see shared references to session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
    MaxAttemptsReached,
    Stopped(StopReason),
}

/// Effects are side effects that the state machine requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEffect {
    /// Run the fetch function under a new token for `attempt`
    Fetch { attempt: AttemptId, kind: AttemptKind },
    /// Cancel the token of `attempt`; its result will be discarded
    CancelFetch { attempt: AttemptId },
    /// Arm the repeating timer; first tick one interval from now
    StartTimer { interval: Duration },
    /// Release the repeating timer
    CancelTimer,
    Notify(Notice),
}
