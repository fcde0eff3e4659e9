// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

/// `settle` with logging pinned to the default level
pub fn settle() -> Command {
    let mut cmd = Command::cargo_bin("settle").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `content` to a temporary `.toml` file kept alive by the handle
pub fn settings_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Parse newline-delimited JSON output
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
