// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll settings
//!
//! The serializable half of a poll configuration. Fetch functions, stop
//! conditions and callbacks live next to these in the engine's
//! `PollConfig`; everything a deployment may want to tune lives here and
//! can be loaded from TOML:
//!
//! ```toml
//! interval = "3s"
//! max_attempts = 40
//! max_consecutive_errors = 5
//! pause_on_hidden = true
//! deadline = "5m"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;
pub const DEFAULT_MAX_CONSECUTIVE_ERRORS: u32 = 5;

/// Tunables for one polling session. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollSettings {
    /// Fixed delay between scheduled attempts
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Scheduled attempts allowed per session, including attempt 0
    pub max_attempts: u32,
    /// Back-to-back failures tolerated before giving up
    pub max_consecutive_errors: u32,
    /// Skip ticks while the host reports itself hidden
    pub pause_on_hidden: bool,
    /// Optional wall-clock budget measured from `start()`
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_consecutive_errors: DEFAULT_MAX_CONSECUTIVE_ERRORS,
            pause_on_hidden: true,
            deadline: None,
        }
    }
}

impl PollSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_consecutive_errors(mut self, max_consecutive_errors: u32) -> Self {
        self.max_consecutive_errors = max_consecutive_errors;
        self
    }

    pub fn with_pause_on_hidden(mut self, pause_on_hidden: bool) -> Self {
        self.pause_on_hidden = pause_on_hidden;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Approximate wall-clock ceiling implied by the attempt budget
    pub fn attempt_budget(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if self.max_consecutive_errors == 0 {
            return Err(ConfigError::ZeroMaxConsecutiveErrors);
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroDeadline);
        }
        Ok(())
    }

    /// Parse and validate settings from TOML. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: PollSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
