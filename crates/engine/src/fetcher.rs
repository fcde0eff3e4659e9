// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied fetch functions

use crate::AttemptToken;
use async_trait::async_trait;
use settle_core::FetchError;
use std::future::Future;
use std::sync::Arc;

/// Queries the status source once.
///
/// Return `FetchError::Cancelled` when giving up because the token was
/// cancelled; any other error counts toward the consecutive-error budget.
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self, token: AttemptToken) -> Result<T, FetchError>;
}

#[async_trait]
impl<T, F> Fetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: Fetcher<T> + ?Sized,
{
    async fn fetch(&self, token: AttemptToken) -> Result<T, FetchError> {
        self.as_ref().fetch(token).await
    }
}

/// Adapter turning an async closure into a [`Fetcher`]
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap `f(token) -> impl Future<Output = Result<T, FetchError>>` as a fetcher
pub fn fetch_fn<F>(f: F) -> FnFetcher<F> {
    FnFetcher { f }
}

#[async_trait]
impl<T, F, Fut> Fetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(AttemptToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    async fn fetch(&self, token: AttemptToken) -> Result<T, FetchError> {
        (self.f)(token).await
    }
}
