// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced fetcher wrapper for consistent observability

use crate::{AttemptToken, Fetcher};
use async_trait::async_trait;
use settle_core::FetchError;
use tracing::Instrument;

/// Wrapper that adds tracing to any Fetcher
#[derive(Clone)]
pub struct TracedFetcher<F> {
    inner: F,
    source: String,
}

impl<F> TracedFetcher<F> {
    pub fn new(source: impl Into<String>, inner: F) -> Self {
        Self {
            inner,
            source: source.into(),
        }
    }
}

#[async_trait]
impl<T, F> Fetcher<T> for TracedFetcher<F>
where
    T: Send + 'static,
    F: Fetcher<T>,
{
    async fn fetch(&self, token: AttemptToken) -> Result<T, FetchError> {
        let span = tracing::info_span!("fetch", source = %self.source, attempt = %token.attempt());

        async move {
            tracing::debug!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.fetch(token).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => tracing::debug!(elapsed_ms, "completed"),
                Err(e) if e.is_cancellation() => tracing::debug!(elapsed_ms, "cancelled"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}
