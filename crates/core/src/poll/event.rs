// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inputs to the poll state machine

use crate::error::FetchError;
use crate::id::{AttemptId, SessionId};

/// How one fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// Superseded or aborted; the result must be discarded
    Cancelled,
    Succeeded(T),
    Failed(FetchError),
}

impl<T> From<Result<T, FetchError>> for FetchOutcome<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Succeeded(value),
            Err(e) if e.is_cancellation() => FetchOutcome::Cancelled,
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Events that can transition a poll session
#[derive(Debug, Clone)]
pub enum PollEvent<T> {
    /// Begin a fresh session (no-op if one is active)
    Start { session_id: SessionId },
    /// The interval timer fired
    Tick,
    /// Manual "check again": one fetch outside the schedule
    Refetch,
    /// A fetch finished
    Settled {
        attempt: AttemptId,
        outcome: FetchOutcome<T>,
    },
    /// Host went to the background
    Hidden,
    /// Host came back to the foreground
    Visible,
    /// Explicit stop
    Stop,
    /// Owner teardown
    Shutdown,
}
