// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord library files.
//!
//! A library is a YAML document naming an instrument and listing titled
//! groups of chord shapes:
//!
//! ```yaml
//! instrument: guitar
//! groups:
//!   - title: Major Chords
//!     chords:
//!       - name: C
//!         frets: [muted, 3, 2, open, 1, open]
//!       - name: F
//!         frets: [1, 3, 3, 2, 1, 1]
//!         barre: { kind: full, fret: 1 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::{
    Barre, BarreKind, ChordDefinition, ChordError, ChordResult, FingerPosition, Instrument,
    InstrumentKind,
};

/// Library embedded in the binary, used when no file is given
pub const BUILTIN_LIBRARY: &str = include_str!("../../library/default.yaml");

/// Root of a chord library file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordLibrary {
    /// Instrument every chord in the file is written for
    #[serde(default)]
    pub instrument: InstrumentSpec,
    /// Titled chord groups, shown as columns
    #[serde(default)]
    pub groups: Vec<ChordGroup>,
}

impl ChordLibrary {
    /// Load a chord library from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read chord library: {:?}", path.as_ref()))?;
        let library = Self::from_yaml(&contents)?;
        debug!(path = ?path.as_ref(), groups = library.groups.len(), "loaded chord library");
        Ok(library)
    }

    /// Parse a chord library from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse chord library YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize chord library to YAML")
    }

    /// Save the library to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write chord library: {:?}", path.as_ref()))
    }

    /// The library shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_LIBRARY).context("Built-in chord library is invalid")
    }

    /// Load from a file when given one, otherwise the built-in library
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Total number of chord entries
    pub fn chord_count(&self) -> usize {
        self.groups.iter().map(|g| g.chords.len()).sum()
    }

    /// Turn every entry into a chord definition
    ///
    /// Only an unusable instrument fails the whole build; individual chords
    /// keep their own error so a host can show a placeholder for them.
    pub fn build(&self) -> Result<Chordbook> {
        let instrument = self.instrument.to_instrument()?;

        let groups = self
            .groups
            .iter()
            .map(|group| ChordbookGroup {
                title: group.title.clone(),
                chords: group
                    .chords
                    .iter()
                    .map(|entry| ChordSlot {
                        name: entry.name.clone(),
                        chord: entry.to_chord(&instrument),
                    })
                    .collect(),
            })
            .collect();

        Ok(Chordbook { instrument, groups })
    }
}

/// Instrument reference: a built-in kind or a custom string set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InstrumentSpec {
    /// "guitar", "ukulele"
    Kind(InstrumentKind),
    /// Label plus string names, left to right
    Custom { label: String, strings: Vec<String> },
}

impl Default for InstrumentSpec {
    fn default() -> Self {
        InstrumentSpec::Kind(InstrumentKind::Guitar)
    }
}

impl InstrumentSpec {
    pub fn to_instrument(&self) -> Result<Instrument> {
        match self {
            InstrumentSpec::Kind(kind) => Ok(kind.instrument()),
            InstrumentSpec::Custom { label, strings } => {
                Instrument::new(label.clone(), strings.iter().cloned())
                    .with_context(|| format!("Invalid custom instrument {:?}", label))
            }
        }
    }
}

/// A titled group of chords
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordGroup {
    pub title: String,
    #[serde(default)]
    pub chords: Vec<ChordEntry>,
}

/// One chord shape as written in a library file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordEntry {
    pub name: String,
    /// One entry per string
    pub frets: Vec<FretSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barre: Option<BarreSpec>,
}

impl ChordEntry {
    /// Build the chord definition for an instrument
    pub fn to_chord(&self, instrument: &Instrument) -> ChordResult<ChordDefinition> {
        let positions = self
            .frets
            .iter()
            .map(FretSpec::to_position)
            .collect::<ChordResult<Vec<_>>>()?;

        let chord = ChordDefinition::new(instrument, positions)?.named(self.name.clone());

        match &self.barre {
            Some(spec) => chord.with_barre(spec.to_barre(instrument.string_count())?),
            None => Ok(chord),
        }
    }
}

/// A string's position in a library file: a fret number or a word
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FretSpec {
    /// 0 for open, 1 and up for a fretted note
    Fret(u8),
    /// "open" or "muted"
    Word(String),
}

impl FretSpec {
    pub fn to_position(&self) -> ChordResult<FingerPosition> {
        match self {
            FretSpec::Fret(0) => Ok(FingerPosition::Open),
            FretSpec::Fret(fret) => Ok(FingerPosition::Fretted(*fret)),
            FretSpec::Word(word) => match word.trim().to_ascii_lowercase().as_str() {
                "open" => Ok(FingerPosition::Open),
                "muted" => Ok(FingerPosition::Muted),
                other => Err(ChordError::invalid(format!(
                    "unknown string position {:?}, expected a fret number, \"open\" or \"muted\"",
                    other
                ))),
            },
        }
    }
}

impl From<FingerPosition> for FretSpec {
    fn from(position: FingerPosition) -> Self {
        match position {
            FingerPosition::Open => FretSpec::Word("open".to_string()),
            FingerPosition::Muted => FretSpec::Word("muted".to_string()),
            FingerPosition::Fretted(fret) => FretSpec::Fret(fret),
        }
    }
}

/// Barre as written in a library file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarreSpec {
    pub kind: BarreKind,
    pub fret: u8,
    /// First string (part barres only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    /// Last string (part barres only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
    /// Annotate this barre's fret
    #[serde(default = "default_barre_label")]
    pub label: bool,
}

fn default_barre_label() -> bool {
    true
}

impl BarreSpec {
    pub fn to_barre(&self, string_count: usize) -> ChordResult<Barre> {
        let (from_string, to_string) = match self.kind {
            BarreKind::Full => (0, string_count.saturating_sub(1)),
            BarreKind::Part => match (self.from, self.to) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    return Err(ChordError::invalid(
                        "part barre needs both `from` and `to` strings",
                    ))
                }
            },
        };

        Ok(Barre {
            kind: self.kind,
            fret: self.fret,
            from_string,
            to_string,
            show_fret_label: self.label,
        })
    }
}

/// A library turned into chord definitions
#[derive(Debug, Clone)]
pub struct Chordbook {
    pub instrument: Instrument,
    pub groups: Vec<ChordbookGroup>,
}

impl Chordbook {
    /// Entries that failed to build, with their group titles
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ChordSlot, &ChordError)> {
        self.groups.iter().flat_map(|group| {
            group.chords.iter().filter_map(move |slot| match &slot.chord {
                Ok(_) => None,
                Err(e) => Some((group.title.as_str(), slot, e)),
            })
        })
    }

    /// Fail on the first chord that did not build
    pub fn validate(&self) -> Result<()> {
        match self.errors().next() {
            Some((group, slot, err)) => Err(anyhow!(
                "chord {:?} in group {:?}: {}",
                slot.name,
                group,
                err
            )),
            None => Ok(()),
        }
    }

    pub fn chord_count(&self) -> usize {
        self.groups.iter().map(|g| g.chords.len()).sum()
    }
}

/// A titled column of built chords
#[derive(Debug, Clone)]
pub struct ChordbookGroup {
    pub title: String,
    pub chords: Vec<ChordSlot>,
}

/// A named chord, or the reason it could not be built
#[derive(Debug, Clone)]
pub struct ChordSlot {
    pub name: String,
    pub chord: ChordResult<ChordDefinition>,
}
