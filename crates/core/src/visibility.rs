// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground/background signal consumed by the poller
//!
//! The host decides what "visible" means (a focused window, an attached
//! terminal, an app in the foreground). Headless callers use
//! [`AlwaysVisible`], which never pauses anything.

use std::sync::Arc;
use tokio::sync::watch;

/// Injected visibility capability: current-state query plus subscription.
///
/// Dropping the receiver returned by `subscribe` unsubscribes.
pub trait Visibility: Send + Sync {
    /// Whether the host is currently foregrounded
    fn is_visible(&self) -> bool;

    /// Receiver notified on every change, or `None` if the state never changes
    fn subscribe(&self) -> Option<watch::Receiver<bool>>;
}

/// Visibility source for headless callers: always foregrounded
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl Visibility for AlwaysVisible {
    fn is_visible(&self) -> bool {
        true
    }

    fn subscribe(&self) -> Option<watch::Receiver<bool>> {
        None
    }
}

/// Visibility source driven by the host through `show()` / `hide()`
#[derive(Debug, Clone)]
pub struct VisibilitySignal {
    sender: Arc<watch::Sender<bool>>,
}

impl VisibilitySignal {
    pub fn new(visible: bool) -> Self {
        let (sender, _) = watch::channel(visible);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Set the state. Returns true if it changed; repeated values notify no one.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        })
    }

    pub fn show(&self) -> bool {
        self.set_visible(true)
    }

    pub fn hide(&self) -> bool {
        self.set_visible(false)
    }
}

impl Default for VisibilitySignal {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Visibility for VisibilitySignal {
    fn is_visible(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> Option<watch::Receiver<bool>> {
        Some(self.sender.subscribe())
    }
}
