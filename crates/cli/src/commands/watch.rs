// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch a payment until it settles

use super::config::SettingsArgs;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use settle_core::{FetchError, StopReason};
use settle_engine::Poller;
use settle_payment::{
    parse_script, PaymentHandlers, PaymentId, PaymentPoller, PaymentStatus, PaymentView,
    ScriptedStatusSource,
};
use std::fmt;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;

/// Exit code when polling ends without a terminal status
const EXIT_UNKNOWN: u8 = 2;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Payment to watch
    pub payment_id: String,

    /// Provider replies in order, the last one repeating
    /// (pending, paid, failed, expired, error)
    #[arg(long, value_name = "STEPS")]
    pub script: String,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Delay before each scripted reply
    #[arg(long, value_parser = humantime::parse_duration)]
    pub latency: Option<Duration>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// One line of progress
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum WatchEvent {
    Status { status: PaymentStatus },
    Error { error: FetchError },
    MaxAttemptsReached { attempts: u32 },
    Unknown { reason: StopReason },
}

impl fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchEvent::Status { status } => write!(f, "status: {}", status),
            WatchEvent::Error { error } => write!(f, "error: {}", error),
            WatchEvent::MaxAttemptsReached { attempts } => {
                write!(f, "gave up after {} attempts", attempts)
            }
            WatchEvent::Unknown { reason } => write!(f, "status unknown: {}", reason),
        }
    }
}

/// Final line, printed once polling ends
#[derive(Debug, Serialize)]
struct Summary {
    event: &'static str,
    payment_id: PaymentId,
    view: PaymentView,
    attempts: u32,
    stop_reason: Option<StopReason>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payment {}: {} after {} attempt{}",
            self.payment_id,
            self.view,
            self.attempts,
            if self.attempts == 1 { "" } else { "s" }
        )?;
        if let Some(reason) = self.stop_reason {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

fn handlers(events: &mpsc::UnboundedSender<WatchEvent>) -> PaymentHandlers {
    let status = |status: PaymentStatus| {
        let events = events.clone();
        move |_: &PaymentId| {
            let _ = events.send(WatchEvent::Status { status });
        }
    };
    let unknown = events.clone();

    PaymentHandlers::new()
        .on_pending(status(PaymentStatus::Pending))
        .on_paid(status(PaymentStatus::Paid))
        .on_failed(status(PaymentStatus::Failed))
        .on_expired(status(PaymentStatus::Expired))
        .on_unknown(move |_, reason| {
            let _ = unknown.send(WatchEvent::Unknown { reason });
        })
}

pub async fn watch(args: WatchArgs) -> Result<ExitCode> {
    let settings = args.settings.resolve()?;
    let mut source = ScriptedStatusSource::new(parse_script(&args.script)?);
    if let Some(latency) = args.latency {
        source = source.with_latency(latency);
    }
    let id = PaymentId::new(args.payment_id);

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let errors = events_tx.clone();
    let exhausted = events_tx.clone();
    let config = PaymentPoller::config(source, id.clone(), handlers(&events_tx))
        .settings(settings.clone())
        .on_error(move |error| {
            let _ = errors.send(WatchEvent::Error {
                error: error.clone(),
            });
        })
        .on_max_attempts_reached(move |attempts| {
            let _ = exhausted.send(WatchEvent::MaxAttemptsReached { attempts });
        });
    drop(events_tx);

    let poller = PaymentPoller::from_poller(id.clone(), Poller::configure(config)?);
    tracing::debug!(
        payment_id = %id,
        interval = ?settings.interval,
        max_attempts = settings.max_attempts,
        "watching payment"
    );
    poller.start();

    let settled = poller.settled();
    tokio::pin!(settled);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut interrupted = false;

    let view = loop {
        tokio::select! {
            Some(event) = events.recv() => output::print(&event, args.format),
            result = &mut interrupt, if !interrupted => {
                interrupted = true;
                if let Err(e) = result {
                    tracing::warn!(error = %e, "cannot listen for ctrl-c");
                } else {
                    poller.stop();
                }
            }
            view = &mut settled => break view,
        }
    };
    while let Ok(event) = events.try_recv() {
        output::print(&event, args.format);
    }

    let snapshot = poller.snapshot();
    output::print(
        &Summary {
            event: "summary",
            payment_id: id,
            view,
            attempts: snapshot.attempts,
            stop_reason: snapshot.stop_reason,
        },
        args.format,
    );

    if view.is_terminal() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_UNKNOWN))
    }
}
