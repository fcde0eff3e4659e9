// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session and attempt identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one polling run, from `start()` to its terminal stop
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out a fresh [`SessionId`] on every `start()`
pub trait SessionIds: Clone + Send + Sync {
    fn next_session(&self) -> SessionId;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSessionIds;

impl SessionIds for RandomSessionIds {
    fn next_session(&self) -> SessionId {
        SessionId(uuid::Uuid::new_v4().to_string())
    }
}

/// `{prefix}-1`, `{prefix}-2`, ... shared between clones
#[derive(Debug, Clone)]
pub struct SequentialSessionIds {
    prefix: Arc<str>,
    issued: Arc<AtomicU64>,
}

impl SequentialSessionIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: Arc::from(prefix),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl SessionIds for SequentialSessionIds {
    fn next_session(&self) -> SessionId {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        SessionId(format!("{}-{n}", self.prefix))
    }
}

/// Epoch of a single fetch.
///
/// Issued in strictly increasing order for the lifetime of a poller,
/// across sessions, so a late outcome can always be told apart from the
/// live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub u64);

impl AttemptId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
