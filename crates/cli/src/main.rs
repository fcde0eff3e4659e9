// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! settle - watch a payment until it settles

mod commands;
mod completions;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{config, watch};
use completions::CompletionsArgs;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "settle",
    version,
    about = "Poll a payment's status until it is paid, failed or expired"
)]
struct Cli {
    /// Log engine activity to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll a scripted payment provider until the payment settles
    Watch(watch::WatchArgs),
    /// Print the effective poll settings
    Config(config::ConfigArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Watch(args) => watch::watch(args).await,
        Commands::Config(args) => {
            config::config(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr so stdout stays machine-readable with `--format json`
fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
