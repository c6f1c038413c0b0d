// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord diagram engine.
//!
//! This module provides:
//! - Instrument definitions (string names and labels)
//! - Chord shapes with at most one barre
//! - Fret window resolution (nut vs. up-the-neck, barre row, label row)
//! - Fixed-width text rendering
//!
//! Nothing here does I/O or keeps state between calls.

pub mod chord;
pub mod error;
pub mod instrument;
pub mod options;
pub mod render;
pub mod window;

pub use chord::{Barre, BarreKind, ChordDefinition, FingerPosition};
pub use error::{ChordError, ChordResult};
pub use instrument::{Instrument, InstrumentKind};
pub use options::DisplayOptions;
pub use render::{render, row_width, Diagram, DiagramRow, RowKind};
pub use window::FretWindow;

/// Number of fret rows drawn in one diagram
pub const WINDOW_SIZE: usize = 4;

/// Frets shown below the highest note when off the nut
pub const WINDOW_BACK_OFFSET: u8 = 2;

/// Highest fret still drawn against the nut
pub const NUT_MAX_FRET: u8 = 2;

/// Characters per string cell
pub const CELL_WIDTH: usize = 3;

/// Fewest strings a diagram can draw
pub const MIN_STRINGS: usize = 2;
