// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Payment status polling on top of the settle engine
//!
//! Polls a provider until a payment is paid, failed or expired. Giving up
//! is not an error: the watch ends as [`PaymentView::Unknown`] and the
//! caller can [`check_again`](PaymentPoller::check_again).

mod handlers;
mod poller;
mod source;
mod status;

pub use handlers::PaymentHandlers;
pub use poller::{PaymentPoller, PaymentView};
pub use source::{PaymentStatusSource, StatusFetcher};
pub use status::{ParseStatusError, PaymentId, PaymentStatus};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod scripted;
#[cfg(any(test, feature = "test-support"))]
pub use scripted::{parse_script, ScriptStep, ScriptedStatusSource};
