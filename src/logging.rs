// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Log output setup
//!
//! The terminal UI owns the screen, so it only ever logs to a file. Print
//! and check modes log to stderr.

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

use crate::config::LoggingSettings;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The configured file, or nowhere
    FileOnly,
    /// The configured file, or stderr
    FileOrStderr,
}

/// Parse a level name such as `"debug"`
pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| anyhow!("Unknown log level: {:?}", level))
}

/// Install the global tracing subscriber
///
/// Returns `false` when nothing was installed, either because there is no
/// place to write or because a subscriber already exists.
pub fn init_logging(settings: &LoggingSettings, target: LogTarget) -> Result<bool> {
    let level = parse_level(&settings.level)?;
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    let installed = match (&settings.file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init().is_ok()
        }
        (None, LogTarget::FileOrStderr) => builder.with_writer(std::io::stderr).try_init().is_ok(),
        (None, LogTarget::FileOnly) => false,
    };

    Ok(installed)
}
