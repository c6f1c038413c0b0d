// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord shape definitions.
//!
//! A [`ChordDefinition`] holds one [`FingerPosition`] per string plus at most
//! one [`Barre`]. Construction validates against the instrument; the builder
//! methods return new values and never touch rendering state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ChordError, ChordResult};
use super::instrument::Instrument;

/// What a single string does in a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerPosition {
    /// Played without fretting
    Open,
    /// Not played
    Muted,
    /// Held down at a fret (1 and up)
    Fretted(u8),
}

impl FingerPosition {
    /// Fret number if this string is fretted
    pub fn fret(self) -> Option<u8> {
        match self {
            FingerPosition::Fretted(fret) => Some(fret),
            FingerPosition::Open | FingerPosition::Muted => None,
        }
    }
}

impl fmt::Display for FingerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerPosition::Open => write!(f, "open"),
            FingerPosition::Muted => write!(f, "muted"),
            FingerPosition::Fretted(fret) => write!(f, "{}", fret),
        }
    }
}

/// Barre span type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarreKind {
    /// Every string of the instrument
    Full,
    /// A contiguous subset of strings
    Part,
}

/// One finger laid across several strings at the same fret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Barre {
    pub kind: BarreKind,
    pub fret: u8,
    /// First covered string (inclusive)
    pub from_string: usize,
    /// Last covered string (inclusive)
    pub to_string: usize,
    /// Whether this barre's fret is the one to annotate
    pub show_fret_label: bool,
}

impl Barre {
    /// Check if the barre lies across a string
    pub fn covers(&self, string: usize) -> bool {
        (self.from_string..=self.to_string).contains(&string)
    }

    /// Number of strings under the barre
    pub fn width(&self) -> usize {
        self.to_string - self.from_string + 1
    }

    fn validate(&self, string_count: usize) -> ChordResult<()> {
        if self.fret == 0 {
            return Err(ChordError::invalid("barre fret must be 1 or higher"));
        }
        if self.from_string >= self.to_string {
            return Err(ChordError::invalid(format!(
                "barre must span at least two strings, got {}..={}",
                self.from_string, self.to_string
            )));
        }
        if self.to_string >= string_count {
            return Err(ChordError::invalid(format!(
                "barre ends on string {} but the instrument has {} strings",
                self.to_string, string_count
            )));
        }
        if self.kind == BarreKind::Full && self.width() != string_count {
            return Err(ChordError::invalid(format!(
                "full barre must cover all {} strings",
                string_count
            )));
        }
        Ok(())
    }
}

/// A chord shape for one instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordDefinition {
    name: Option<String>,
    positions: Vec<FingerPosition>,
    barre: Option<Barre>,
}

impl ChordDefinition {
    /// Create a chord with one position per instrument string
    pub fn new(
        instrument: &Instrument,
        positions: impl Into<Vec<FingerPosition>>,
    ) -> ChordResult<Self> {
        let chord = Self {
            name: None,
            positions: positions.into(),
            barre: None,
        };
        chord.validate(instrument)?;
        Ok(chord)
    }

    /// All strings open, no barre
    pub fn open(instrument: &Instrument) -> Self {
        Self {
            name: None,
            positions: vec![FingerPosition::Open; instrument.string_count()],
            barre: None,
        }
    }

    /// Attach a display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Lay a barre across every string at `fret`, replacing any existing barre
    pub fn with_full_barre(self, fret: u8) -> ChordResult<Self> {
        let last = self.positions.len().saturating_sub(1);
        self.with_barre(Barre {
            kind: BarreKind::Full,
            fret,
            from_string: 0,
            to_string: last,
            show_fret_label: true,
        })
    }

    /// Lay a barre across strings `from_string..=to_string` at `fret`,
    /// replacing any existing barre
    pub fn with_part_barre(
        self,
        fret: u8,
        from_string: usize,
        to_string: usize,
        show_label: bool,
    ) -> ChordResult<Self> {
        self.with_barre(Barre {
            kind: BarreKind::Part,
            fret,
            from_string,
            to_string,
            show_fret_label: show_label,
        })
    }

    /// Set a prebuilt barre, replacing any existing one
    pub fn with_barre(mut self, barre: Barre) -> ChordResult<Self> {
        barre.validate(self.positions.len())?;
        self.barre = Some(barre);
        self.check_barre_holds_a_string()?;
        Ok(self)
    }

    /// Drop the barre, if any
    pub fn without_barre(mut self) -> Self {
        self.barre = None;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn positions(&self) -> &[FingerPosition] {
        &self.positions
    }

    pub fn barre(&self) -> Option<&Barre> {
        self.barre.as_ref()
    }

    pub fn string_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if a string's note comes from the barre rather than its own finger
    pub fn is_held_by_barre(&self, string: usize) -> bool {
        match (self.barre, self.positions.get(string)) {
            (Some(barre), Some(position)) if barre.covers(string) => match position {
                FingerPosition::Open => true,
                FingerPosition::Fretted(fret) => *fret == barre.fret,
                FingerPosition::Muted => false,
            },
            _ => false,
        }
    }

    /// Lowest and highest fret in use, counting the barre
    pub fn fret_range(&self) -> Option<(u8, u8)> {
        self.positions
            .iter()
            .filter_map(|p| p.fret())
            .chain(self.barre.map(|b| b.fret))
            .fold(None, |range, fret| match range {
                None => Some((fret, fret)),
                Some((low, high)) => Some((low.min(fret), high.max(fret))),
            })
    }

    /// Check this chord against an instrument
    pub fn validate(&self, instrument: &Instrument) -> ChordResult<()> {
        if self.positions.len() != instrument.string_count() {
            return Err(ChordError::invalid(format!(
                "{} has {} strings but the chord lists {} positions",
                instrument.label(),
                instrument.string_count(),
                self.positions.len()
            )));
        }
        if let Some(string) = self
            .positions
            .iter()
            .position(|p| *p == FingerPosition::Fretted(0))
        {
            return Err(ChordError::invalid(format!(
                "string {} is fretted at 0; use an open position instead",
                string
            )));
        }
        if let Some(barre) = &self.barre {
            barre.validate(self.positions.len())?;
            self.check_barre_holds_a_string()?;
        }
        Ok(())
    }

    fn check_barre_holds_a_string(&self) -> ChordResult<()> {
        match self.barre {
            Some(barre) if !(barre.from_string..=barre.to_string).any(|s| self.is_held_by_barre(s)) => {
                Err(ChordError::invalid(format!(
                    "barre at fret {} does not hold any string",
                    barre.fret
                )))
            }
            _ => Ok(()),
        }
    }
}
