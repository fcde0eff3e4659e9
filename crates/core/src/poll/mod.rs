// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll controller state machine
//!
//! This module provides:
//! - **PollSession**: attempt/error counters, pause state, the live attempt
//! - **PollEvent** / **PollEffect**: the machine's inputs and requested side effects
//! - **PollSnapshot**: the read-only view handed to callers

mod effect;
mod event;
mod session;
mod snapshot;
mod state;

pub use effect::{AttemptKind, Notice, PollEffect};
pub use event::{FetchOutcome, PollEvent};
pub use session::{LiveAttempt, PollSession};
pub use snapshot::PollSnapshot;
pub use state::{PollState, StopReason};
