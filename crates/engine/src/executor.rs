// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetch executor
//!
//! Runs the caller's fetch function once per attempt and reports every
//! outcome tagged with its attempt id. At most one token is live: launching
//! a new attempt cancels the previous one first.

use crate::{AttemptToken, Fetcher};
use settle_core::{AttemptId, FetchOutcome};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outcome of one attempt, as delivered back to the driver
#[derive(Debug)]
pub struct Settlement<T> {
    pub attempt: AttemptId,
    pub outcome: FetchOutcome<T>,
}

/// Launches attempts and owns the single live token
pub struct FetchExecutor<T> {
    fetcher: Arc<dyn Fetcher<T>>,
    settled: mpsc::UnboundedSender<Settlement<T>>,
    live: Option<AttemptToken>,
}

impl<T: Send + 'static> FetchExecutor<T> {
    pub fn new(fetcher: Arc<dyn Fetcher<T>>, settled: mpsc::UnboundedSender<Settlement<T>>) -> Self {
        Self {
            fetcher,
            settled,
            live: None,
        }
    }

    /// Start `attempt`, cancelling whatever attempt was live before it
    pub fn launch(&mut self, attempt: AttemptId) -> AttemptToken {
        self.cancel_live();

        let token = AttemptToken::new(attempt);
        self.live = Some(token.clone());

        let fetcher = Arc::clone(&self.fetcher);
        let settled = self.settled.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            let outcome = execute(fetcher.as_ref(), task_token).await;
            // Fails only after teardown, when nobody is left to tell
            let _ = settled.send(Settlement { attempt, outcome });
        });

        token
    }

    /// Cancel `attempt` if it is the live one
    pub fn cancel(&mut self, attempt: AttemptId) {
        if self.live.as_ref().is_some_and(|t| t.attempt() == attempt) {
            self.cancel_live();
        }
    }

    pub fn cancel_live(&mut self) {
        if let Some(token) = self.live.take() {
            token.cancel();
        }
    }

    pub fn live(&self) -> Option<&AttemptToken> {
        self.live.as_ref()
    }
}

impl<T> Drop for FetchExecutor<T> {
    fn drop(&mut self) {
        if let Some(token) = self.live.take() {
            token.cancel();
        }
    }
}

/// Run one fetch under `token`.
///
/// A result that arrives after cancellation is reported as
/// `Cancelled`, never as success or failure.
pub async fn execute<T>(fetcher: &dyn Fetcher<T>, token: AttemptToken) -> FetchOutcome<T> {
    let result = tokio::select! {
        biased;
        _ = token.cancelled() => return FetchOutcome::Cancelled,
        result = fetcher.fetch(token.clone()) => result,
    };

    if token.is_cancelled() {
        return FetchOutcome::Cancelled;
    }
    FetchOutcome::from(result)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
