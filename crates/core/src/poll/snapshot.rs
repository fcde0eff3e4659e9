// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only view of a poll session

use super::{PollSession, PollState, StopReason};
use crate::error::FetchError;
use crate::id::SessionId;
use serde::Serialize;

/// Point-in-time copy of everything the read accessors expose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollSnapshot<T> {
    pub session_id: Option<SessionId>,
    pub state: PollState,
    pub data: Option<T>,
    pub last_error: Option<FetchError>,
    pub attempts: u32,
    pub consecutive_errors: u32,
    pub is_paused: bool,
    pub is_loading: bool,
    pub stop_reason: Option<StopReason>,
}

impl<T> PollSnapshot<T> {
    pub fn is_polling(&self) -> bool {
        self.state != PollState::Stopped
    }

    /// Ended after having run at least once
    pub fn is_finished(&self) -> bool {
        !self.is_polling() && self.stop_reason.is_some()
    }
}

impl<T: Clone> From<&PollSession<T>> for PollSnapshot<T> {
    fn from(session: &PollSession<T>) -> Self {
        Self {
            session_id: session.id.clone(),
            state: session.state(),
            data: session.last_result.clone(),
            last_error: session.last_error.clone(),
            attempts: session.attempts,
            consecutive_errors: session.consecutive_errors,
            is_paused: session.is_paused(),
            is_loading: session.is_loading(),
            stop_reason: session.stop_reason,
        }
    }
}
