// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-attempt cancellation handle

use settle_core::{AttemptId, FetchError};
use tokio_util::sync::CancellationToken;

/// Cancellation handle handed to the fetch function for one attempt.
///
/// Cancelling guarantees the attempt's result is discarded, not that the
/// underlying work stops; fetchers that can abort early should watch
/// [`cancelled`](Self::cancelled) or call [`check`](Self::check).
#[derive(Debug, Clone)]
pub struct AttemptToken {
    attempt: AttemptId,
    cancel: CancellationToken,
}

impl AttemptToken {
    pub fn new(attempt: AttemptId) -> Self {
        Self {
            attempt,
            cancel: CancellationToken::new(),
        }
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the attempt has been superseded or aborted
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// `Err(FetchError::Cancelled)` once cancelled, for use with `?`
    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }
}
