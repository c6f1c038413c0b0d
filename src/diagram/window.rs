// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fret window resolution.
//!
//! Decides which frets a diagram shows, whether the top of the grid is the
//! nut, where a barre is drawn, and which separator row carries the fret
//! number. Everything here is derived from the chord on every call.

use super::chord::{Barre, BarreKind, ChordDefinition};
use super::error::{ChordError, ChordResult};
use super::{NUT_MAX_FRET, WINDOW_BACK_OFFSET, WINDOW_SIZE};

/// The slice of the fretboard one diagram shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretWindow {
    /// Fret number of content row 0
    pub base_fret: u8,
    /// Window starts at the nut (double-ruled top, no position label)
    pub is_nut: bool,
    /// Separator row that carries the fret label
    pub label_row: Option<usize>,
    /// Fret number written on `label_row`
    pub label_value: Option<u8>,
}

impl FretWindow {
    /// Resolve the window for a chord
    ///
    /// Labels are only placed when `show_fret_numbers` is set and the window
    /// is off the nut.
    pub fn resolve(chord: &ChordDefinition, show_fret_numbers: bool) -> ChordResult<Self> {
        let range = chord.fret_range();

        if let Some((lowest, highest)) = range {
            if (highest - lowest) as usize >= WINDOW_SIZE {
                return Err(ChordError::UnsupportedFretSpan {
                    lowest,
                    highest,
                    window: WINDOW_SIZE as u8,
                });
            }
        }

        let max_fret = range.map_or(0, |(_, high)| high);
        let is_nut = max_fret <= NUT_MAX_FRET;

        let base_fret = match range {
            _ if is_nut => 1,
            // pull the window down if the lowest note would fall off the top
            Some((lowest, highest)) => highest.saturating_sub(WINDOW_BACK_OFFSET).max(1).min(lowest),
            None => 1,
        };

        let mut window = Self {
            base_fret,
            is_nut,
            label_row: None,
            label_value: None,
        };

        if show_fret_numbers && !is_nut {
            if let Some((lowest, _)) = range {
                window.place_label(chord.barre(), lowest);
            }
        }

        Ok(window)
    }

    fn place_label(&mut self, barre: Option<&Barre>, lowest: u8) {
        let target = match barre {
            // a full barre owns row 0; without its label the chord has none
            Some(barre) if barre.kind == BarreKind::Full => {
                if barre.show_fret_label {
                    self.label_row = Some(0);
                    self.label_value = Some(barre.fret);
                }
                return;
            }
            Some(barre) if barre.show_fret_label => barre.fret,
            _ => lowest,
        };

        let row = if u16::from(target) >= self.top_fret() {
            Some(0)
        } else {
            self.row_of(target)
        };

        if row.is_some() {
            self.label_row = row;
            self.label_value = Some(target);
        }
    }

    /// Highest fret shown
    ///
    /// Wider than a fret so windows near fret 255 do not wrap.
    pub fn top_fret(&self) -> u16 {
        u16::from(self.base_fret) + WINDOW_SIZE as u16 - 1
    }

    /// Check if a fret falls inside the window
    pub fn contains(&self, fret: u8) -> bool {
        fret >= self.base_fret && u16::from(fret) <= self.top_fret()
    }

    /// Content row showing a fret, if visible
    pub fn row_of(&self, fret: u8) -> Option<usize> {
        if self.contains(fret) {
            Some((fret - self.base_fret) as usize)
        } else {
            None
        }
    }

    /// Content row a barre is drawn on
    ///
    /// A full barre anchors the window at row 0. A part barre sits on its
    /// own fret's row, pinned to the nearest edge row if outside the window.
    pub fn barre_row(&self, barre: &Barre) -> usize {
        match barre.kind {
            BarreKind::Full => 0,
            BarreKind::Part => (barre.fret.saturating_sub(self.base_fret) as usize).min(WINDOW_SIZE - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::chord::FingerPosition::{Fretted, Muted, Open};
    use crate::diagram::instrument::Instrument;

    fn chord(positions: Vec<crate::diagram::FingerPosition>) -> ChordDefinition {
        ChordDefinition::new(&Instrument::guitar(), positions).unwrap()
    }

    #[test]
    fn test_open_chord_at_nut() {
        let window = FretWindow::resolve(&ChordDefinition::open(&Instrument::guitar()), true).unwrap();
        assert!(window.is_nut);
        assert_eq!(window.base_fret, 1);
        assert_eq!(window.label_row, None);
        assert_eq!(window.label_value, None);
    }

    #[test]
    fn test_low_chord_stays_at_nut() {
        let c = chord(vec![Muted, Fretted(2), Fretted(2), Open, Fretted(1), Open]);
        let window = FretWindow::resolve(&c, true).unwrap();
        assert!(window.is_nut);
        assert_eq!(window.base_fret, 1);
        assert_eq!(window.label_row, None);
    }

    #[test]
    fn test_full_barre_at_five() {
        let c = ChordDefinition::open(&Instrument::guitar()).with_full_barre(5).unwrap();
        let window = FretWindow::resolve(&c, true).unwrap();
        assert!(!window.is_nut);
        assert_eq!(window.base_fret, 3);
        assert_eq!(window.label_row, Some(0));
        assert_eq!(window.label_value, Some(5));
        assert_eq!(window.barre_row(c.barre().unwrap()), 0);
    }

    #[test]
    fn test_no_label_when_disabled() {
        let c = ChordDefinition::open(&Instrument::guitar()).with_full_barre(5).unwrap();
        let window = FretWindow::resolve(&c, false).unwrap();
        assert_eq!(window.base_fret, 3);
        assert_eq!(window.label_row, None);
        assert_eq!(window.label_value, None);
    }

    #[test]
    fn test_unlabelled_full_barre_places_no_label() {
        let c = ChordDefinition::open(&Instrument::guitar())
            .with_barre(Barre {
                kind: BarreKind::Full,
                fret: 5,
                from_string: 0,
                to_string: 5,
                show_fret_label: false,
            })
            .unwrap();
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 3);
        assert_eq!(window.barre_row(c.barre().unwrap()), 0);
        assert_eq!(window.label_row, None);
        assert_eq!(window.label_value, None);
    }

    #[test]
    fn test_label_near_last_fret() {
        let c = chord(vec![Muted, Muted, Muted, Muted, Muted, Fretted(255)]);
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 253);
        assert_eq!(window.top_fret(), 256);
        assert_eq!(window.row_of(255), Some(2));
        assert_eq!(window.label_row, Some(2));
        assert_eq!(window.label_value, Some(255));
    }

    #[test]
    fn test_part_barre_row_at_nut() {
        let c = chord(vec![Open, Open, Open, Fretted(1), Fretted(1), Fretted(1)])
            .with_part_barre(2, 0, 2, true)
            .unwrap();
        let window = FretWindow::resolve(&c, true).unwrap();
        assert!(window.is_nut);
        assert_eq!(window.base_fret, 1);
        assert_eq!(window.barre_row(c.barre().unwrap()), 1);
    }

    #[test]
    fn test_window_backs_off_two_frets() {
        let c = chord(vec![Muted, Fretted(7), Fretted(7), Fretted(6), Fretted(5), Muted]);
        let window = FretWindow::resolve(&c, true).unwrap();
        assert!(!window.is_nut);
        assert_eq!(window.base_fret, 5);
        assert_eq!(window.top_fret(), 8);
        // lowest fretted note labels its own row
        assert_eq!(window.label_row, Some(0));
        assert_eq!(window.label_value, Some(5));
    }

    #[test]
    fn test_window_pulled_down_for_wide_shape() {
        let c = chord(vec![Muted, Fretted(3), Fretted(5), Fretted(5), Fretted(6), Muted]);
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 3);
        assert!(window.contains(3));
        assert!(window.contains(6));
        assert_eq!(window.label_row, Some(0));
        assert_eq!(window.label_value, Some(3));
    }

    #[test]
    fn test_single_note_labels_row() {
        let c = chord(vec![Muted, Muted, Muted, Muted, Muted, Fretted(9)]);
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 7);
        assert_eq!(window.label_row, Some(2));
        assert_eq!(window.label_value, Some(9));
    }

    #[test]
    fn test_part_barre_label_targets_barre_fret() {
        let c = chord(vec![Open, Open, Open, Open, Fretted(6), Muted])
            .with_part_barre(5, 0, 3, true)
            .unwrap();
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 4);
        assert_eq!(window.barre_row(c.barre().unwrap()), 1);
        assert_eq!(window.label_row, Some(1));
        assert_eq!(window.label_value, Some(5));
    }

    #[test]
    fn test_anchor_fret_labels_row_zero() {
        // lowest note sits on the window's last row once the window is pulled down
        let c = chord(vec![Fretted(4), Fretted(7), Muted, Muted, Muted, Muted])
            .with_part_barre(7, 1, 2, true)
            .unwrap();
        let window = FretWindow::resolve(&c, true).unwrap();
        assert_eq!(window.base_fret, 4);
        assert_eq!(window.top_fret(), 7);
        assert_eq!(window.label_row, Some(0));
        assert_eq!(window.label_value, Some(7));
    }

    #[test]
    fn test_unsupported_span() {
        let c = chord(vec![Fretted(1), Open, Open, Open, Open, Fretted(6)]);
        let err = FretWindow::resolve(&c, false).unwrap_err();
        assert_eq!(
            err,
            ChordError::UnsupportedFretSpan {
                lowest: 1,
                highest: 6,
                window: 4
            }
        );

        let c = chord(vec![Fretted(3), Open, Open, Open, Open, Fretted(6)]);
        assert!(FretWindow::resolve(&c, false).is_ok());
    }

    #[test]
    fn test_part_barre_row_clamped() {
        let barre = Barre {
            kind: BarreKind::Part,
            fret: 12,
            from_string: 0,
            to_string: 2,
            show_fret_label: false,
        };
        let window = FretWindow {
            base_fret: 3,
            is_nut: false,
            label_row: None,
            label_value: None,
        };
        assert_eq!(window.barre_row(&barre), WINDOW_SIZE - 1);

        let low = Barre { fret: 1, ..barre };
        assert_eq!(window.barre_row(&low), 0);
    }
}
