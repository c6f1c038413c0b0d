// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for chord construction and diagram rendering.

use thiserror::Error;

/// Errors raised while building or rendering a chord diagram
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    /// Position count, barre range or fret values do not fit the instrument
    #[error("invalid chord definition: {0}")]
    InvalidChordDefinition(String),

    /// Fretted notes cover more frets than one diagram window can show
    #[error("chord spans frets {lowest}-{highest}, more than {window} frets fit in one diagram")]
    UnsupportedFretSpan {
        lowest: u8,
        highest: u8,
        window: u8,
    },

    /// Instrument has too few strings or a name too wide for a cell
    #[error("invalid instrument: {0}")]
    InvalidInstrument(String),
}

impl ChordError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ChordError::InvalidChordDefinition(reason.into())
    }
}

/// Result alias for the diagram core
pub type ChordResult<T> = std::result::Result<T, ChordError>;
