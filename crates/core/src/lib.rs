// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! settle-core: pure building blocks for polling a long-running external process
//!
//! This crate provides:
//! - The poll session state machine (no timers, no I/O)
//! - Stop conditions, settings and error types
//! - Clock, id and visibility abstractions injected by the engine

pub mod clock;
pub mod error;
pub mod id;
pub mod poll;
pub mod settings;
pub mod stop;
pub mod visibility;

// Re-exports
pub use clock::{Clock, FakeClock, TokioClock};
pub use error::{ConfigError, FetchError};
pub use id::{AttemptId, RandomSessionIds, SequentialSessionIds, SessionId, SessionIds};
pub use poll::{
    AttemptKind, FetchOutcome, LiveAttempt, Notice, PollEffect, PollEvent, PollSession,
    PollSnapshot, PollState, StopReason,
};
pub use settings::PollSettings;
pub use stop::StopCondition;
pub use visibility::{AlwaysVisible, Visibility, VisibilitySignal};
