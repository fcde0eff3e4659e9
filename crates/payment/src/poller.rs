// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payment poller: the generic engine configured for one payment

use crate::source::StatusFetcher;
use crate::{PaymentHandlers, PaymentId, PaymentStatus, PaymentStatusSource};
use serde::Serialize;
use settle_core::{
    AlwaysVisible, ConfigError, FetchError, PollSettings, PollSnapshot, StopCondition, StopReason,
    Visibility,
};
use settle_engine::{PollConfig, Poller};
use std::fmt;
use std::sync::Arc;

/// What the caller should show for a payment right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentView {
    /// Still waiting on the provider
    Pending,
    Paid,
    Failed,
    Expired,
    /// Polling ended without a terminal status; offer "check again"
    Unknown,
}

impl PaymentView {
    pub fn from_snapshot(snapshot: &PollSnapshot<PaymentStatus>) -> Self {
        match snapshot.data {
            Some(PaymentStatus::Paid) => PaymentView::Paid,
            Some(PaymentStatus::Failed) => PaymentView::Failed,
            Some(PaymentStatus::Expired) => PaymentView::Expired,
            _ if snapshot.is_finished() => PaymentView::Unknown,
            _ => PaymentView::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentView::Paid | PaymentView::Failed | PaymentView::Expired
        )
    }
}

impl fmt::Display for PaymentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentView::Pending => "pending",
            PaymentView::Paid => "paid",
            PaymentView::Failed => "failed",
            PaymentView::Expired => "expired",
            PaymentView::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Watches one payment until it settles
#[derive(Debug)]
pub struct PaymentPoller {
    id: PaymentId,
    poller: Poller<PaymentStatus>,
}

impl PaymentPoller {
    /// Configure a watch on `id` on the current tokio runtime
    pub fn new(
        source: impl PaymentStatusSource + 'static,
        id: PaymentId,
        settings: PollSettings,
        handlers: PaymentHandlers,
    ) -> Result<Self, ConfigError> {
        Self::with_visibility(source, id, settings, handlers, AlwaysVisible)
    }

    /// Like [`new`](Self::new), pausing while `visibility` reports hidden
    pub fn with_visibility(
        source: impl PaymentStatusSource + 'static,
        id: PaymentId,
        settings: PollSettings,
        handlers: PaymentHandlers,
        visibility: impl Visibility + 'static,
    ) -> Result<Self, ConfigError> {
        let config = Self::config(source, id.clone(), handlers)
            .settings(settings)
            .visibility(visibility);
        let poller = Poller::configure(config)?;
        Ok(Self { id, poller })
    }

    /// The engine configuration behind a payment watch, for callers that
    /// need to inject a clock or extra callbacks
    pub fn config(
        source: impl PaymentStatusSource + 'static,
        id: PaymentId,
        handlers: PaymentHandlers,
    ) -> PollConfig<PaymentStatus> {
        let handlers = Arc::new(handlers);
        let on_status = {
            let handlers = Arc::clone(&handlers);
            let id = id.clone();
            move |status: &PaymentStatus| handlers.status(&id, *status)
        };
        let on_stopped = {
            let id = id.clone();
            move |reason: StopReason| handlers.stopped(&id, reason)
        };

        PollConfig::new(StatusFetcher::new(source, id.clone()))
            .stop_condition(StopCondition::when_not(PaymentStatus::Pending))
            .on_success(on_status)
            .on_stopped(on_stopped)
            .label(format!("payment {id}"))
    }

    /// Wrap an already configured engine poller
    pub fn from_poller(id: PaymentId, poller: Poller<PaymentStatus>) -> Self {
        Self { id, poller }
    }

    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn start(&self) {
        self.poller.start();
    }

    pub fn stop(&self) {
        self.poller.stop();
    }

    /// Query the provider once more, even after polling gave up
    pub fn check_again(&self) {
        self.poller.refetch();
    }

    pub fn view(&self) -> PaymentView {
        PaymentView::from_snapshot(&self.poller.snapshot())
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        self.poller.data()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.poller.last_error()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_polling()
    }

    pub fn attempts(&self) -> u32 {
        self.poller.attempts()
    }

    pub fn snapshot(&self) -> PollSnapshot<PaymentStatus> {
        self.poller.snapshot()
    }

    pub fn poller(&self) -> &Poller<PaymentStatus> {
        &self.poller
    }

    /// Wait for polling to end and return what to show
    pub async fn settled(&self) -> PaymentView {
        let snapshot = self.poller.wait_until_stopped().await;
        PaymentView::from_snapshot(&snapshot)
    }

    pub async fn shutdown(self) -> PaymentView {
        let snapshot = self.poller.shutdown().await;
        PaymentView::from_snapshot(&snapshot)
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
