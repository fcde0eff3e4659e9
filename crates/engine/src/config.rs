// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Everything a poller needs, gathered before it is configured

use crate::{Fetcher, PollCallbacks};
use settle_core::{AlwaysVisible, FetchError, PollSettings, StopCondition, StopReason, Visibility};
use std::sync::Arc;

/// Builder for a [`Poller`](crate::Poller).
///
/// Only the fetch function is required; settings default to a 3s interval,
/// 40 attempts and 5 consecutive errors.
pub struct PollConfig<T> {
    pub(crate) fetcher: Arc<dyn Fetcher<T>>,
    pub(crate) settings: PollSettings,
    pub(crate) stop_condition: Option<StopCondition<T>>,
    pub(crate) callbacks: PollCallbacks<T>,
    pub(crate) visibility: Arc<dyn Visibility>,
    pub(crate) label: String,
}

impl<T: 'static> PollConfig<T> {
    pub fn new(fetcher: impl Fetcher<T> + 'static) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    pub fn from_arc(fetcher: Arc<dyn Fetcher<T>>) -> Self {
        Self {
            fetcher,
            settings: PollSettings::default(),
            stop_condition: None,
            callbacks: PollCallbacks::default(),
            visibility: Arc::new(AlwaysVisible),
            label: "poll".to_string(),
        }
    }

    pub fn settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Stop once a successful result satisfies `predicate`
    pub fn stop_when(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.stop_condition = Some(StopCondition::new(predicate));
        self
    }

    pub fn stop_condition(mut self, condition: StopCondition<T>) -> Self {
        self.stop_condition = Some(condition);
        self
    }

    pub fn callbacks(mut self, callbacks: PollCallbacks<T>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.callbacks = self.callbacks.on_success(f);
        self
    }

    pub fn on_error(mut self, f: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.callbacks = self.callbacks.on_error(f);
        self
    }

    pub fn on_max_attempts_reached(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.callbacks = self.callbacks.on_max_attempts_reached(f);
        self
    }

    pub fn on_stopped(mut self, f: impl Fn(StopReason) + Send + Sync + 'static) -> Self {
        self.callbacks = self.callbacks.on_stopped(f);
        self
    }

    /// Foreground signal; ignored unless `pause_on_hidden` is set
    pub fn visibility(mut self, source: impl Visibility + 'static) -> Self {
        self.visibility = Arc::new(source);
        self
    }

    /// Name used in tracing spans
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<T> std::fmt::Debug for PollConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollConfig")
            .field("label", &self.label)
            .field("settings", &self.settings)
            .field("stop_condition", &self.stop_condition)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
