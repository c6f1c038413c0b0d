// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for chordbox.
//!
//! This module provides the application settings file (TOML), chord
//! library files (YAML) and a watcher that reloads a library when it
//! changes on disk.

pub mod library;
pub mod watcher;

pub use library::{
    BarreSpec, ChordEntry, ChordGroup, ChordLibrary, ChordSlot, Chordbook, ChordbookGroup,
    FretSpec, InstrumentSpec, BUILTIN_LIBRARY,
};
pub use watcher::{LibraryEvent, LibraryWatcher};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::DisplayOptions;

/// Settings file name looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "chordbox.toml";

/// Root application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Initial display toggles
    pub display: DisplayOptions,
    /// Which chord library to show
    pub library: LibrarySettings,
    /// Log output
    pub logging: LoggingSettings,
    /// Extra key bindings: shortcut ("f", "ctrl+r") to action name
    pub keyboard: HashMap<String, String>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            debug!(path = ?path.as_ref(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse settings from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse settings TOML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = self.to_toml()?;
        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))
    }
}

/// Chord library selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library file; the built-in library is used when unset
    pub path: Option<PathBuf>,
    /// Reload the library when the file changes
    pub watch: bool,
    /// Debounce for file change events, in milliseconds
    pub debounce_ms: u64,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            path: None,
            watch: true,
            debounce_ms: 500,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file; in the TUI, logging is off when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
