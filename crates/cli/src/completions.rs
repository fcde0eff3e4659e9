// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the settle CLI.
//!
//! ```bash
//! settle completions bash > ~/.local/share/bash-completion/completions/settle
//! settle completions zsh > ~/.zfunc/_settle
//! ```

use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions for `cmd` and write them to stdout
pub fn generate_completions(cmd: &mut clap::Command, shell: Shell) {
    generate(shell, cmd, "settle", &mut io::stdout());
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
