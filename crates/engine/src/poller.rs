// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poller handle and the driver task behind it
//!
//! The driver owns the [`PollSession`] and is the only place it changes.
//! Commands, settlements, visibility changes and timer ticks are all
//! funnelled through one select loop, so transitions never interleave.

use crate::executor::{FetchExecutor, Settlement};
use crate::timer::PollTimer;
use crate::visibility::VisibilityMonitor;
use crate::{Fetcher, PollCallbacks, PollConfig, TracedFetcher};
use settle_core::{
    Clock, ConfigError, FetchError, Notice, PollEffect, PollEvent, PollSession, PollSnapshot, PollState,
    RandomSessionIds, SessionId, SessionIds, StopReason, TokioClock,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

enum Command {
    Start,
    Stop,
    Refetch,
    /// Acknowledged once every earlier command has been applied
    Flush(oneshot::Sender<()>),
}

/// Handle to a running poll driver.
///
/// Commands are fire-and-forget; accessors read the latest published
/// snapshot. Dropping the handle tears the driver down the same way
/// [`shutdown`](Self::shutdown) does, minus the wait.
pub struct Poller<T> {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<PollSnapshot<T>>,
    shutdown: CancellationToken,
    driver: Option<JoinHandle<()>>,
}

/// Validate `config` and spawn its driver on the current tokio runtime
pub fn configure<T>(config: PollConfig<T>) -> Result<Poller<T>, ConfigError>
where
    T: Clone + Send + Sync + 'static,
{
    Poller::configure(config)
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Validate `config` and spawn its driver on the current tokio runtime.
    ///
    /// Fails with [`ConfigError::NoRuntime`] when called outside one.
    pub fn configure(config: PollConfig<T>) -> Result<Self, ConfigError> {
        Self::configure_with(config, TokioClock, RandomSessionIds)
    }

    /// Like [`configure`](Self::configure) with injected clock and session ids
    pub fn configure_with<C, I>(config: PollConfig<T>, clock: C, ids: I) -> Result<Self, ConfigError>
    where
        C: Clock + 'static,
        I: SessionIds + 'static,
    {
        config.settings.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;

        let PollConfig {
            fetcher,
            settings,
            stop_condition,
            callbacks,
            visibility,
            label,
        } = config;

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let traced: Arc<dyn Fetcher<T>> = Arc::new(TracedFetcher::new(label.clone(), fetcher));
        let session = PollSession::new(settings, stop_condition);
        let (snapshot_tx, snapshot_rx) = watch::channel(PollSnapshot::from(&session));
        let monitor = VisibilityMonitor::new(visibility.as_ref(), session.settings().pause_on_hidden);

        let mut driver = Driver {
            session,
            executor: FetchExecutor::new(traced, settled_tx),
            timer: PollTimer::idle(),
            visibility: monitor,
            callbacks,
            snapshot: snapshot_tx,
            clock,
            ids,
        };
        if !driver.visibility.is_visible() {
            driver.apply(PollEvent::Hidden);
        }

        let span = tracing::info_span!("poll", label = %label);
        let handle = runtime.spawn(
            driver
                .run(commands_rx, settled_rx, shutdown.clone())
                .instrument(span),
        );

        Ok(Self {
            commands: commands_tx,
            snapshot: snapshot_rx,
            shutdown,
            driver: Some(handle),
        })
    }

    /// Begin a fresh session; no-op while one is active
    pub fn start(&self) {
        self.send(Command::Start);
    }

    /// End the active session; idempotent
    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    /// Run one fetch now without waiting for the next tick
    pub fn refetch(&self) {
        self.send(Command::Refetch);
    }

    /// Wait until every command sent so far has been applied
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.send(Command::Flush(ack));
        let _ = done.await;
    }

    pub fn snapshot(&self) -> PollSnapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified after every transition
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.snapshot.clone()
    }

    pub fn data(&self) -> Option<T> {
        self.snapshot.borrow().data.clone()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.snapshot.borrow().last_error.clone()
    }

    pub fn state(&self) -> PollState {
        self.snapshot.borrow().state
    }

    pub fn is_polling(&self) -> bool {
        self.snapshot.borrow().is_polling()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().is_loading
    }

    pub fn is_paused(&self) -> bool {
        self.snapshot.borrow().is_paused
    }

    pub fn attempts(&self) -> u32 {
        self.snapshot.borrow().attempts
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.snapshot.borrow().consecutive_errors
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.snapshot.borrow().stop_reason
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.snapshot.borrow().session_id.clone()
    }

    /// Wait for the current session to end and return the final snapshot.
    ///
    /// Returns immediately when nothing is polling. Callbacks fired by the
    /// stopping transition have run by the time this returns.
    pub async fn wait_until_stopped(&self) -> PollSnapshot<T> {
        self.flush().await;
        let mut rx = self.snapshot.clone();
        let snapshot = match rx.wait_for(|snapshot| !snapshot.is_polling()).await {
            Ok(snapshot) => snapshot.clone(),
            // Driver gone: whatever it published last is final
            Err(_) => self.snapshot(),
        };
        self.flush().await;
        snapshot
    }

    /// Stop polling, cancel any live fetch and wait for the driver to exit
    pub async fn shutdown(mut self) -> PollSnapshot<T> {
        self.shutdown.cancel();
        if let Some(handle) = self.driver.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "poll driver ended abnormally");
            }
        }
        self.snapshot()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::debug!("poll driver has exited, command ignored");
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl<T> std::fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("running", &self.driver.as_ref().is_some_and(|h| !h.is_finished()))
            .finish_non_exhaustive()
    }
}

struct Driver<T, C, I> {
    session: PollSession<T>,
    executor: FetchExecutor<T>,
    timer: PollTimer,
    visibility: VisibilityMonitor,
    callbacks: PollCallbacks<T>,
    snapshot: watch::Sender<PollSnapshot<T>>,
    clock: C,
    ids: I,
}

impl<T, C, I> Driver<T, C, I>
where
    T: Clone + Send + Sync + 'static,
    C: Clock,
    I: SessionIds,
{
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut settled: mpsc::UnboundedReceiver<Settlement<T>>,
        shutdown: CancellationToken,
    ) {
        tracing::debug!("driver started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,

                command = commands.recv() => match command {
                    Some(Command::Start) => {
                        let session_id = self.ids.next_session();
                        self.apply(PollEvent::Start { session_id });
                    }
                    Some(Command::Stop) => self.apply(PollEvent::Stop),
                    Some(Command::Refetch) => self.apply(PollEvent::Refetch),
                    Some(Command::Flush(ack)) => {
                        let _ = ack.send(());
                    }
                    // Every handle is gone
                    None => break,
                },

                Some(Settlement { attempt, outcome }) = settled.recv() => {
                    self.apply(PollEvent::Settled { attempt, outcome });
                }

                visible = self.visibility.transition() => {
                    let event = if visible { PollEvent::Visible } else { PollEvent::Hidden };
                    self.apply(event);
                }

                _ = self.timer.tick() => self.apply(PollEvent::Tick),
            }
        }

        self.apply(PollEvent::Shutdown);
        tracing::debug!("driver exited");
    }

    /// Transition, publish the new snapshot, then perform the effects
    fn apply(&mut self, event: PollEvent<T>) {
        let (next, effects) = self.session.transition(event, &self.clock);
        self.session = next;
        self.snapshot.send_replace(PollSnapshot::from(&self.session));

        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: PollEffect) {
        match effect {
            PollEffect::Fetch { attempt, kind } => {
                tracing::debug!(
                    %attempt,
                    ?kind,
                    attempts = self.session.attempts,
                    "issuing fetch"
                );
                self.executor.launch(attempt);
            }
            PollEffect::CancelFetch { attempt } => {
                tracing::debug!(%attempt, "cancelling fetch");
                self.executor.cancel(attempt);
            }
            PollEffect::StartTimer { interval } => {
                if let Some(session_id) = &self.session.id {
                    tracing::info!(session_id = %session_id, ?interval, "polling started");
                }
                self.timer.arm(interval);
            }
            PollEffect::CancelTimer => self.timer.disarm(),
            PollEffect::Notify(notice) => {
                if let Notice::Stopped(reason) = notice {
                    if reason.is_exhaustion() {
                        tracing::warn!(
                            %reason,
                            attempts = self.session.attempts,
                            consecutive_errors = self.session.consecutive_errors,
                            "polling gave up"
                        );
                    } else {
                        tracing::info!(%reason, attempts = self.session.attempts, "polling stopped");
                    }
                }
                self.callbacks.dispatch(notice, &self.session);
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
