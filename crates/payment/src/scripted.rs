// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted status source for tests and demos
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{ParseStatusError, PaymentId, PaymentStatus, PaymentStatusSource};
use async_trait::async_trait;
use settle_core::FetchError;
use settle_engine::AttemptToken;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Status(PaymentStatus),
    Error(FetchError),
}

impl FromStr for ScriptStep {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("error") {
            return Ok(ScriptStep::Error(FetchError::transport("scripted failure")));
        }
        s.parse().map(ScriptStep::Status)
    }
}

/// Parse a comma-separated script such as `pending,error,paid`
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ParseStatusError> {
    script
        .split(',')
        .filter(|step| !step.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Replays its script one step per call, repeating the last step forever
#[derive(Debug, Clone)]
pub struct ScriptedStatusSource {
    steps: Arc<Vec<ScriptStep>>,
    latency: Duration,
    calls: Arc<Mutex<Vec<PaymentId>>>,
}

impl ScriptedStatusSource {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: Arc::new(steps.into_iter().collect()),
            latency: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn statuses(statuses: impl IntoIterator<Item = PaymentStatus>) -> Self {
        Self::new(statuses.into_iter().map(ScriptStep::Status))
    }

    /// Delay every reply; cancellation cuts the delay short
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Payment ids queried so far, in order
    pub fn calls(&self) -> Vec<PaymentId> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl PaymentStatusSource for ScriptedStatusSource {
    async fn fetch_status(
        &self,
        id: &PaymentId,
        token: &AttemptToken,
    ) -> Result<PaymentStatus, FetchError> {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
            calls.push(id.clone());
            calls.len() - 1
        };

        if !self.latency.is_zero() {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(FetchError::Cancelled),
                _ = tokio::time::sleep(self.latency) => {}
            }
        }

        match self.steps.get(index).or(self.steps.last()) {
            Some(ScriptStep::Status(status)) => Ok(*status),
            Some(ScriptStep::Error(error)) => Err(error.clone()),
            None => Err(FetchError::other("empty script")),
        }
    }
}

#[cfg(test)]
#[path = "scripted_tests.rs"]
mod tests;
