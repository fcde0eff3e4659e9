// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the polling engine

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a fetch function
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// The attempt was superseded or aborted. Never counted, never reported.
    #[error("fetch cancelled")]
    Cancelled,
    /// The status source could not be reached
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The status source answered with a failure status
    #[error("status {code}: {message}")]
    Status { code: u16, message: String },
    /// The response could not be interpreted
    #[error("decode error: {message}")]
    Decode { message: String },
    #[error("{message}")]
    Other { message: String },
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        FetchError::Decode {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        FetchError::Other {
            message: message.into(),
        }
    }

    /// True when this failure must be ignored rather than counted
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Errors in poll settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interval must be greater than zero")]
    ZeroInterval,
    #[error("max_attempts must be at least 1")]
    ZeroMaxAttempts,
    #[error("max_consecutive_errors must be at least 1")]
    ZeroMaxConsecutiveErrors,
    #[error("deadline must be greater than zero when set")]
    ZeroDeadline,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("a poller must be configured inside a tokio runtime")]
    NoRuntime,
}
