// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chordbox - chord diagrams for fretted instruments
//!
//! The [`diagram`] module turns a chord definition into rows of box-drawing
//! text. The rest of the crate hosts those diagrams: settings and chord
//! libraries ([`config`]), key bindings ([`control`]) and a terminal
//! browser ([`ui`]).

pub mod config;
pub mod control;
pub mod diagram;
pub mod logging;
pub mod ui;

pub use config::{ChordLibrary, Chordbook, Settings};
pub use diagram::{
    render, Barre, BarreKind, ChordDefinition, ChordError, Diagram, DisplayOptions,
    FingerPosition, FretWindow, Instrument, InstrumentKind,
};
