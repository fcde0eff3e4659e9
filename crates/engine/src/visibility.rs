// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Visibility subscription held by the driver

use settle_core::Visibility;
use tokio::sync::watch;

/// Turns a [`Visibility`] source into a stream of changes.
///
/// Dropping the monitor drops the receiver, which is the unsubscribe.
#[derive(Debug)]
pub struct VisibilityMonitor {
    receiver: Option<watch::Receiver<bool>>,
    visible: bool,
}

impl VisibilityMonitor {
    /// Subscribe to `source`; when `enabled` is false nothing is watched
    pub fn new(source: &dyn Visibility, enabled: bool) -> Self {
        let receiver = if enabled { source.subscribe() } else { None };
        let visible = match &receiver {
            Some(rx) => *rx.borrow(),
            None => true,
        };
        Self { receiver, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Wait for the next change and return the new state.
    ///
    /// Never resolves when nothing is watched, or after the source is gone.
    pub async fn transition(&mut self) -> bool {
        loop {
            let Some(receiver) = self.receiver.as_mut() else {
                return std::future::pending().await;
            };
            if receiver.changed().await.is_err() {
                tracing::debug!("visibility source dropped, no longer watching");
                self.receiver = None;
                continue;
            }
            let visible = *receiver.borrow_and_update();
            if visible != self.visible {
                self.visible = visible;
                return visible;
            }
        }
    }
}
