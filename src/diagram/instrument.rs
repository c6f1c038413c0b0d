// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument definitions.
//!
//! An instrument is just an ordered list of string names (left to right as
//! drawn) plus a label used for diagram titles. Built-in instruments live in
//! a small variant table; adding one means adding a row there.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ChordError, ChordResult};
use super::{CELL_WIDTH, MIN_STRINGS};

/// Built-in instrument kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Guitar,
    Ukulele,
}

struct Variant {
    kind: InstrumentKind,
    label: &'static str,
    strings: &'static [&'static str],
}

const VARIANTS: &[Variant] = &[
    Variant {
        kind: InstrumentKind::Guitar,
        label: "Guitar",
        strings: &["E", "A", "D", "G", "B", "E"],
    },
    Variant {
        kind: InstrumentKind::Ukulele,
        label: "Ukulele",
        strings: &["G", "C", "E", "A"],
    },
];

impl InstrumentKind {
    /// All built-in kinds in table order
    pub const ALL: [InstrumentKind; 2] = [InstrumentKind::Guitar, InstrumentKind::Ukulele];

    fn variant(self) -> &'static Variant {
        // table rows follow enum declaration order
        &VARIANTS[self as usize]
    }

    /// Display label ("Guitar", "Ukulele")
    pub fn label(self) -> &'static str {
        self.variant().label
    }

    /// Build the instrument for this kind
    pub fn instrument(self) -> Instrument {
        let variant = self.variant();
        Instrument {
            label: variant.label.to_string(),
            strings: variant.strings.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a kind by name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        VARIANTS
            .iter()
            .find(|v| v.label.eq_ignore_ascii_case(name))
            .map(|v| v.kind)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fretted instrument: ordered string names and a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    label: String,
    strings: Vec<String>,
}

impl Instrument {
    /// Create a custom instrument
    ///
    /// Fails with [`ChordError::InvalidInstrument`] when there are fewer than
    /// two strings or a string name does not fit in one diagram cell.
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        strings: impl IntoIterator<Item = S>,
    ) -> ChordResult<Self> {
        let label = label.into();
        let strings: Vec<String> = strings.into_iter().map(Into::into).collect();

        if strings.len() < MIN_STRINGS {
            return Err(ChordError::InvalidInstrument(format!(
                "{} needs at least {} strings, got {}",
                label,
                MIN_STRINGS,
                strings.len()
            )));
        }
        if let Some(name) = strings
            .iter()
            .find(|s| s.is_empty() || s.chars().count() > CELL_WIDTH)
        {
            return Err(ChordError::InvalidInstrument(format!(
                "string name {:?} must be 1-{} characters",
                name, CELL_WIDTH
            )));
        }

        Ok(Self { label, strings })
    }

    /// Six-string guitar in standard tuning
    pub fn guitar() -> Self {
        InstrumentKind::Guitar.instrument()
    }

    /// Four-string ukulele in standard tuning
    pub fn ukulele() -> Self {
        InstrumentKind::Ukulele.instrument()
    }

    /// String names, left to right as drawn
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Title shown above each diagram for this instrument
    pub fn title(&self) -> String {
        format!("{} Chord", self.label)
    }
}

impl From<InstrumentKind> for Instrument {
    fn from(kind: InstrumentKind) -> Self {
        kind.instrument()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_instruments() {
        let guitar = Instrument::guitar();
        assert_eq!(guitar.string_count(), 6);
        assert_eq!(guitar.strings(), ["E", "A", "D", "G", "B", "E"]);
        assert_eq!(guitar.title(), "Guitar Chord");

        let uke = Instrument::ukulele();
        assert_eq!(uke.string_count(), 4);
        assert_eq!(uke.strings(), ["G", "C", "E", "A"]);
        assert_eq!(uke.label(), "Ukulele");
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(InstrumentKind::from_name("guitar"), Some(InstrumentKind::Guitar));
        assert_eq!(InstrumentKind::from_name(" UKULELE "), Some(InstrumentKind::Ukulele));
        assert_eq!(InstrumentKind::from_name("banjo"), None);
    }

    #[test]
    fn test_every_kind_has_a_variant() {
        for kind in InstrumentKind::ALL {
            assert_eq!(kind.variant().kind, kind);
            assert_eq!(kind.instrument().label(), kind.label());
        }
    }

    #[test]
    fn test_custom_instrument() {
        let mandolin = Instrument::new("Mandolin", ["G", "D", "A", "E"]).unwrap();
        assert_eq!(mandolin.string_count(), 4);

        let err = Instrument::new("Monochord", ["C"]).unwrap_err();
        assert!(matches!(err, ChordError::InvalidInstrument(_)));

        let err = Instrument::new("Odd", ["Bb3x", "E"]).unwrap_err();
        assert!(matches!(err, ChordError::InvalidInstrument(_)));
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: InstrumentKind = serde_yaml::from_str("ukulele").unwrap();
        assert_eq!(kind, InstrumentKind::Ukulele);
        assert_eq!(serde_yaml::to_string(&InstrumentKind::Guitar).unwrap().trim(), "guitar");
    }
}
