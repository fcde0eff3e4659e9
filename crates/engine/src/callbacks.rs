// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller callbacks fired from the driver task

use settle_core::{FetchError, Notice, PollSession, StopReason};

type SuccessFn<T> = Box<dyn Fn(&T) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&FetchError) + Send + Sync>;
type MaxAttemptsFn = Box<dyn Fn(u32) + Send + Sync>;
type StoppedFn = Box<dyn Fn(StopReason) + Send + Sync>;

/// Optional hooks, each invoked at most once per matching notice.
///
/// Callbacks run on the driver task; keep them short and non-blocking.
pub struct PollCallbacks<T> {
    on_success: Option<SuccessFn<T>>,
    on_error: Option<ErrorFn>,
    on_max_attempts_reached: Option<MaxAttemptsFn>,
    on_stopped: Option<StoppedFn>,
}

impl<T> Default for PollCallbacks<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            on_max_attempts_reached: None,
            on_stopped: None,
        }
    }
}

impl<T> PollCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_max_attempts_reached(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_max_attempts_reached = Some(Box::new(f));
        self
    }

    pub fn on_stopped(mut self, f: impl Fn(StopReason) + Send + Sync + 'static) -> Self {
        self.on_stopped = Some(Box::new(f));
        self
    }

    /// Fire the hook for `notice`, reading its payload from `session`
    pub fn dispatch(&self, notice: Notice, session: &PollSession<T>) {
        match notice {
            Notice::Success => {
                if let (Some(f), Some(value)) = (&self.on_success, &session.last_result) {
                    f(value);
                }
            }
            Notice::Error => {
                if let (Some(f), Some(error)) = (&self.on_error, &session.last_error) {
                    f(error);
                }
            }
            Notice::MaxAttemptsReached => {
                if let Some(f) = &self.on_max_attempts_reached {
                    f(session.attempts);
                }
            }
            Notice::Stopped(reason) => {
                if let Some(f) = &self.on_stopped {
                    f(reason);
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for PollCallbacks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollCallbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_max_attempts_reached", &self.on_max_attempts_reached.is_some())
            .field("on_stopped", &self.on_stopped.is_some())
            .finish()
    }
}
