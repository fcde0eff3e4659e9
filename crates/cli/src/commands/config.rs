// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll settings from file and flags

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use settle_core::PollSettings;
use std::path::PathBuf;
use std::time::Duration;

/// Settings sources shared by every command that polls.
///
/// Precedence: flags, then the TOML file, then built-in defaults.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// TOML file with poll settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Time between scheduled attempts (e.g. 500ms, 3s)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Scheduled attempts before giving up
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Back-to-back failures before giving up
    #[arg(long = "max-errors")]
    pub max_consecutive_errors: Option<u32>,

    /// Wall-clock limit for one session (e.g. 30s, 2m)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub deadline: Option<Duration>,
}

impl SettingsArgs {
    pub fn resolve(&self) -> Result<PollSettings> {
        let mut settings = match &self.config {
            Some(path) => PollSettings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => PollSettings::default(),
        };

        if let Some(interval) = self.interval {
            settings = settings.with_interval(interval);
        }
        if let Some(max_attempts) = self.max_attempts {
            settings = settings.with_max_attempts(max_attempts);
        }
        if let Some(max_errors) = self.max_consecutive_errors {
            settings = settings.with_max_consecutive_errors(max_errors);
        }
        if let Some(deadline) = self.deadline {
            settings = settings.with_deadline(deadline);
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output format (text prints TOML)
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn config(args: ConfigArgs) -> Result<()> {
    let settings = args.settings.resolve()?;

    match args.format {
        OutputFormat::Text => print!("{}", settings.to_toml_string()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
    }
    Ok(())
}
