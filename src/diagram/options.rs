// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Display toggles passed into every render call.

use serde::{Deserialize, Serialize};

/// Which optional parts of a diagram to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Finger markers inside the grid
    pub show_fingers: bool,
    /// String-name row above the grid
    pub show_tuning: bool,
    /// Fret number beside the grid when off the nut
    pub show_fret_numbers: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_fingers: true,
            show_tuning: true,
            show_fret_numbers: true,
        }
    }
}

impl DisplayOptions {
    /// Everything off
    pub fn bare() -> Self {
        Self {
            show_fingers: false,
            show_tuning: false,
            show_fret_numbers: false,
        }
    }

    pub fn toggle_fingers(&mut self) -> bool {
        self.show_fingers = !self.show_fingers;
        self.show_fingers
    }

    pub fn toggle_tuning(&mut self) -> bool {
        self.show_tuning = !self.show_tuning;
        self.show_tuning
    }

    pub fn toggle_fret_numbers(&mut self) -> bool {
        self.show_fret_numbers = !self.show_fret_numbers;
        self.show_fret_numbers
    }
}
