// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Settle polling engine
//!
//! Drives a [`settle_core::PollSession`] on a tokio task: real timers,
//! per-attempt cancellation, visibility pausing and caller callbacks.

mod callbacks;
mod config;
mod executor;
mod fetcher;
mod poller;
mod timer;
mod token;
mod traced;
mod visibility;

pub use callbacks::PollCallbacks;
pub use config::PollConfig;
pub use executor::{execute, FetchExecutor, Settlement};
pub use fetcher::{fetch_fn, FnFetcher, Fetcher};
pub use poller::{configure, Poller};
pub use timer::PollTimer;
pub use token::AttemptToken;
pub use traced::TracedFetcher;
pub use visibility::VisibilityMonitor;
