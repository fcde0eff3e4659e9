// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-status reactions for a watched payment

use crate::{PaymentId, PaymentStatus};
use settle_core::StopReason;

type StatusFn = Box<dyn Fn(&PaymentId) + Send + Sync>;
type UnknownFn = Box<dyn Fn(&PaymentId, StopReason) + Send + Sync>;

/// Optional handlers, each fired when its status is observed.
///
/// `on_unknown` fires when polling gives up (attempt budget, error budget
/// or deadline) without ever seeing a terminal status.
#[derive(Default)]
pub struct PaymentHandlers {
    on_paid: Option<StatusFn>,
    on_failed: Option<StatusFn>,
    on_expired: Option<StatusFn>,
    on_pending: Option<StatusFn>,
    on_unknown: Option<UnknownFn>,
}

impl PaymentHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_paid(mut self, f: impl Fn(&PaymentId) + Send + Sync + 'static) -> Self {
        self.on_paid = Some(Box::new(f));
        self
    }

    pub fn on_failed(mut self, f: impl Fn(&PaymentId) + Send + Sync + 'static) -> Self {
        self.on_failed = Some(Box::new(f));
        self
    }

    pub fn on_expired(mut self, f: impl Fn(&PaymentId) + Send + Sync + 'static) -> Self {
        self.on_expired = Some(Box::new(f));
        self
    }

    pub fn on_pending(mut self, f: impl Fn(&PaymentId) + Send + Sync + 'static) -> Self {
        self.on_pending = Some(Box::new(f));
        self
    }

    pub fn on_unknown(mut self, f: impl Fn(&PaymentId, StopReason) + Send + Sync + 'static) -> Self {
        self.on_unknown = Some(Box::new(f));
        self
    }

    pub(crate) fn status(&self, id: &PaymentId, status: PaymentStatus) {
        tracing::debug!(payment_id = %id, %status, "payment status observed");
        let handler = match status {
            PaymentStatus::Paid => &self.on_paid,
            PaymentStatus::Failed => &self.on_failed,
            PaymentStatus::Expired => &self.on_expired,
            PaymentStatus::Pending => &self.on_pending,
        };
        if let Some(f) = handler {
            f(id);
        }
    }

    pub(crate) fn stopped(&self, id: &PaymentId, reason: StopReason) {
        if !reason.is_exhaustion() {
            return;
        }
        tracing::info!(payment_id = %id, %reason, "payment status unknown");
        if let Some(f) = &self.on_unknown {
            f(id, reason);
        }
    }
}

impl std::fmt::Debug for PaymentHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentHandlers")
            .field("on_paid", &self.on_paid.is_some())
            .field("on_failed", &self.on_failed.is_some())
            .field("on_expired", &self.on_expired.is_some())
            .field("on_pending", &self.on_pending.is_some())
            .field("on_unknown", &self.on_unknown.is_some())
            .finish()
    }
}
