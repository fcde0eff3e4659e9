// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stop evaluator: decides when the awaited process reached a terminal state

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a successful fetch result.
///
/// Evaluated once per success. `true` ends the session immediately,
/// whatever attempt or error budget remains.
pub struct StopCondition<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> StopCondition<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Stops as soon as the result differs from `value`
    pub fn when_not(value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Self::new(move |result| *result != value)
    }

    pub fn is_met(&self, result: &T) -> bool {
        (self.predicate)(result)
    }
}

impl<T> Clone for StopCondition<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for StopCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StopCondition(..)")
    }
}
