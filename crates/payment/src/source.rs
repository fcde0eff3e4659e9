// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port to whatever knows a payment's current status

use crate::{PaymentId, PaymentStatus};
use async_trait::async_trait;
use settle_core::FetchError;
use settle_engine::{AttemptToken, Fetcher};
use std::sync::Arc;

/// Queries the provider for one payment's status.
///
/// Implementations may watch `token` to abandon a superseded request early.
#[async_trait]
pub trait PaymentStatusSource: Send + Sync {
    async fn fetch_status(
        &self,
        id: &PaymentId,
        token: &AttemptToken,
    ) -> Result<PaymentStatus, FetchError>;
}

#[async_trait]
impl<S: PaymentStatusSource + ?Sized> PaymentStatusSource for Arc<S> {
    async fn fetch_status(
        &self,
        id: &PaymentId,
        token: &AttemptToken,
    ) -> Result<PaymentStatus, FetchError> {
        self.as_ref().fetch_status(id, token).await
    }
}

/// Binds a source to one payment so the engine can poll it
pub struct StatusFetcher<S> {
    source: S,
    id: PaymentId,
}

impl<S> StatusFetcher<S> {
    pub fn new(source: S, id: PaymentId) -> Self {
        Self { source, id }
    }
}

#[async_trait]
impl<S: PaymentStatusSource> Fetcher<PaymentStatus> for StatusFetcher<S> {
    async fn fetch(&self, token: AttemptToken) -> Result<PaymentStatus, FetchError> {
        self.source.fetch_status(&self.id, &token).await
    }
}
