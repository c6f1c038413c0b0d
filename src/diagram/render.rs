// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text rendering of chord diagrams.
//!
//! Every row is `1 + 3 * string_count` characters: a one-character left
//! margin followed by a three-character cell per string. Fret labels are
//! carried beside the row text so the grid itself keeps a fixed width.
//!
//! ```text
//!   G  C  E  A
//!   ┌──┬──┬──┐
//!   ◉━━━━━━━━◉
//!   ├──┼──┼──┤ 5
//!   │  │  │  │
//! ```

use std::fmt;

use super::chord::{Barre, ChordDefinition, FingerPosition};
use super::error::ChordResult;
use super::instrument::Instrument;
use super::options::DisplayOptions;
use super::window::FretWindow;
use super::{CELL_WIDTH, WINDOW_SIZE};

const MARGIN: char = ' ';

const NUT_TOP: [&str; 3] = [" ╒═", "═╤═", "═╕ "];
const TOP: [&str; 3] = [" ┌─", "─┬─", "─┐ "];
const SEPARATOR: [&str; 3] = [" ├─", "─┼─", "─┤ "];
const BOTTOM: [&str; 3] = [" └─", "─┴─", "─┘ "];

const BLANK: &str = " │ ";
const FINGER: &str = " ● ";
const BARRE_START: &str = " ◉━";
const BARRE_MIDDLE: &str = "━━━";
const BARRE_END: &str = "━◉ ";

/// Glyph used for finger markers
pub const FINGER_GLYPH: char = '●';
/// Glyph used at both ends of a barre
pub const BARRE_GLYPH: char = '◉';

/// What a diagram row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// String names
    Tuning,
    /// Nut or floating top border
    Top,
    /// Finger/barre row for a window row
    Content(usize),
    /// Rule below a window row (the last one is the bottom border)
    Separator(usize),
}

/// One fixed-width line of a diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRow {
    pub kind: RowKind,
    text: String,
    label: Option<String>,
}

impl DiagramRow {
    fn new(kind: RowKind, text: String) -> Self {
        Self {
            kind,
            text,
            label: None,
        }
    }

    /// Grid text without the fret label
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fret number printed after the row, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Row text followed by its label
    pub fn line(&self) -> String {
        match &self.label {
            Some(label) => format!("{}{}", self.text, label),
            None => self.text.clone(),
        }
    }
}

/// A rendered chord diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    title: String,
    name: Option<String>,
    window: FretWindow,
    width: usize,
    rows: Vec<DiagramRow>,
}

impl Diagram {
    /// Instrument title, e.g. "Guitar Chord"
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Chord name, if the definition has one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Window the diagram was drawn with
    pub fn window(&self) -> &FretWindow {
        &self.window
    }

    /// Width in characters of every row's grid text
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[DiagramRow] {
        &self.rows
    }

    /// All rows as plain lines, labels included
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(DiagramRow::line).collect()
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row.line())?;
        }
        Ok(())
    }
}

/// Width of every diagram row for a string count
pub fn row_width(string_count: usize) -> usize {
    1 + CELL_WIDTH * string_count
}

/// Render a chord for an instrument
///
/// Pure: the same inputs always give the same diagram. Fails when the chord
/// does not match the instrument or spans more frets than the window shows.
pub fn render(
    instrument: &Instrument,
    chord: &ChordDefinition,
    options: DisplayOptions,
) -> ChordResult<Diagram> {
    chord.validate(instrument)?;
    let window = FretWindow::resolve(chord, options.show_fret_numbers)?;
    let strings = instrument.string_count();

    let mut rows = Vec::with_capacity(2 + 2 * WINDOW_SIZE);

    if options.show_tuning {
        rows.push(DiagramRow::new(RowKind::Tuning, tuning_row(instrument)));
    }

    let top = if window.is_nut { NUT_TOP } else { TOP };
    rows.push(DiagramRow::new(RowKind::Top, rule(strings, top)));

    let barre = chord.barre().map(|b| (window.barre_row(b), b));

    for row in 0..WINDOW_SIZE {
        let barre_here = barre.and_then(|(at, b)| (at == row).then_some(b));
        rows.push(DiagramRow::new(
            RowKind::Content(row),
            content_row(chord, &window, row, barre_here, options.show_fingers),
        ));

        let glyphs = if row == WINDOW_SIZE - 1 { BOTTOM } else { SEPARATOR };
        let mut separator = DiagramRow::new(RowKind::Separator(row), rule(strings, glyphs));
        if window.label_row == Some(row) {
            separator.label = window.label_value.map(|fret| fret.to_string());
        }
        rows.push(separator);
    }

    Ok(Diagram {
        title: instrument.title(),
        name: chord.name().map(str::to_string),
        window,
        width: row_width(strings),
        rows,
    })
}

fn tuning_row(instrument: &Instrument) -> String {
    let mut row = String::with_capacity(row_width(instrument.string_count()));
    row.push(MARGIN);
    for name in instrument.strings() {
        row.push_str(&format!("{:^width$}", name, width = CELL_WIDTH));
    }
    row
}

fn rule(strings: usize, [first, middle, last]: [&str; 3]) -> String {
    let mut row = String::with_capacity(row_width(strings) * 3);
    row.push(MARGIN);
    row.push_str(first);
    for _ in 0..strings.saturating_sub(2) {
        row.push_str(middle);
    }
    row.push_str(last);
    row
}

fn content_row(
    chord: &ChordDefinition,
    window: &FretWindow,
    row: usize,
    barre: Option<&Barre>,
    show_fingers: bool,
) -> String {
    let mut text = String::with_capacity(row_width(chord.string_count()) * 3);
    text.push(MARGIN);

    for (string, position) in chord.positions().iter().enumerate() {
        let cell = match barre {
            Some(b) if string == b.from_string => BARRE_START,
            Some(b) if string == b.to_string => BARRE_END,
            Some(b) if b.covers(string) => BARRE_MIDDLE,
            _ => match position {
                FingerPosition::Fretted(fret)
                    if show_fingers
                        && !chord.is_held_by_barre(string)
                        && window.row_of(*fret) == Some(row) =>
                {
                    FINGER
                }
                _ => BLANK,
            },
        };
        text.push_str(cell);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::chord::FingerPosition::{Fretted, Muted, Open};
    use crate::diagram::error::ChordError;

    fn guitar() -> Instrument {
        Instrument::guitar()
    }

    fn content(diagram: &Diagram, row: usize) -> &str {
        diagram
            .rows()
            .iter()
            .find(|r| r.kind == RowKind::Content(row))
            .map(DiagramRow::text)
            .unwrap()
    }

    fn separator(diagram: &Diagram, row: usize) -> &DiagramRow {
        diagram
            .rows()
            .iter()
            .find(|r| r.kind == RowKind::Separator(row))
            .unwrap()
    }

    #[test]
    fn test_open_chord_layout() {
        let chord = ChordDefinition::open(&guitar());
        let diagram = render(&guitar(), &chord, DisplayOptions::default()).unwrap();

        assert_eq!(
            diagram.lines(),
            vec![
                "  E  A  D  G  B  E ",
                "  ╒══╤══╤══╤══╤══╕ ",
                "  │  │  │  │  │  │ ",
                "  ├──┼──┼──┼──┼──┤ ",
                "  │  │  │  │  │  │ ",
                "  ├──┼──┼──┼──┼──┤ ",
                "  │  │  │  │  │  │ ",
                "  ├──┼──┼──┼──┼──┤ ",
                "  │  │  │  │  │  │ ",
                "  └──┴──┴──┴──┴──┘ ",
            ]
        );
        assert!(diagram.window().is_nut);
        assert!(diagram.rows().iter().all(|r| r.label().is_none()));
    }

    #[test]
    fn test_fixed_width_rows() {
        for instrument in [Instrument::guitar(), Instrument::ukulele()] {
            let chord = ChordDefinition::open(&instrument).with_full_barre(5).unwrap();
            let diagram = render(&instrument, &chord, DisplayOptions::default()).unwrap();
            let width = instrument.string_count() * 3 + 1;
            assert_eq!(diagram.width(), width);
            for row in diagram.rows() {
                assert_eq!(row.text().chars().count(), width, "row {:?}", row.kind);
            }
        }
    }

    #[test]
    fn test_full_barre_at_five() {
        let chord = ChordDefinition::open(&guitar()).with_full_barre(5).unwrap();
        let diagram = render(&guitar(), &chord, DisplayOptions::default()).unwrap();

        assert_eq!(diagram.window().base_fret, 3);
        assert_eq!(diagram.rows()[1].text(), "  ┌──┬──┬──┬──┬──┐ ");
        assert_eq!(content(&diagram, 0), "  ◉━━━━━━━━━━━━━━◉ ");
        assert_eq!(separator(&diagram, 0).label(), Some("5"));
        assert_eq!(separator(&diagram, 0).line(), "  ├──┼──┼──┼──┼──┤ 5");
        assert_eq!(separator(&diagram, 1).label(), None);
    }

    #[test]
    fn test_full_barre_without_label() {
        let chord = ChordDefinition::open(&guitar())
            .with_barre(Barre {
                kind: crate::diagram::chord::BarreKind::Full,
                fret: 5,
                from_string: 0,
                to_string: 5,
                show_fret_label: false,
            })
            .unwrap();
        let diagram = render(&guitar(), &chord, DisplayOptions::default()).unwrap();

        assert_eq!(content(&diagram, 0), "  ◉━━━━━━━━━━━━━━◉ ");
        assert!(diagram.rows().iter().all(|r| r.label().is_none()));
        assert_eq!(separator(&diagram, 2).line(), "  ├──┼──┼──┼──┼──┤ ");
    }

    #[test]
    fn test_part_barre_with_fingers() {
        let chord = ChordDefinition::new(
            &guitar(),
            vec![Open, Open, Open, Fretted(1), Fretted(1), Fretted(1)],
        )
        .unwrap()
        .with_part_barre(2, 0, 2, true)
        .unwrap();
        let diagram = render(&guitar(), &chord, DisplayOptions::default()).unwrap();

        assert_eq!(diagram.window().base_fret, 1);
        assert_eq!(content(&diagram, 0), "  │  │  │  ●  ●  ● ");
        assert_eq!(content(&diagram, 1), "  ◉━━━━━◉  │  │  │ ");
        assert_eq!(content(&diagram, 2), "  │  │  │  │  │  │ ");
    }

    #[test]
    fn test_muted_and_open_strings_have_no_marker() {
        let chord = ChordDefinition::new(
            &guitar(),
            vec![Muted, Fretted(3), Fretted(2), Open, Fretted(1), Open],
        )
        .unwrap();
        let diagram = render(&guitar(), &chord, DisplayOptions::default()).unwrap();

        assert!(!diagram.window().is_nut);
        assert_eq!(diagram.window().base_fret, 1);
        assert_eq!(content(&diagram, 0), "  │  │  │  │  ●  │ ");
        assert_eq!(content(&diagram, 1), "  │  │  ●  │  │  │ ");
        assert_eq!(content(&diagram, 2), "  │  ●  │  │  │  │ ");
        assert_eq!(separator(&diagram, 0).label(), Some("1"));
    }

    #[test]
    fn test_hide_fingers_keeps_barre_and_borders() {
        let chord = ChordDefinition::new(
            &guitar(),
            vec![Open, Open, Open, Fretted(1), Fretted(1), Fretted(1)],
        )
        .unwrap()
        .with_part_barre(2, 0, 2, true)
        .unwrap();

        let shown = render(&guitar(), &chord, DisplayOptions::default()).unwrap();
        let hidden = render(
            &guitar(),
            &chord,
            DisplayOptions {
                show_fingers: false,
                ..DisplayOptions::default()
            },
        )
        .unwrap();

        assert!(!hidden.lines().iter().any(|l| l.contains(FINGER_GLYPH)));
        assert_eq!(content(&hidden, 1), content(&shown, 1));
        for (a, b) in shown.rows().iter().zip(hidden.rows()) {
            if !matches!(a.kind, RowKind::Content(_)) {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_tuning_row_toggle() {
        let chord = ChordDefinition::open(&Instrument::ukulele());
        let with = render(&Instrument::ukulele(), &chord, DisplayOptions::default()).unwrap();
        let without = render(
            &Instrument::ukulele(),
            &chord,
            DisplayOptions {
                show_tuning: false,
                ..DisplayOptions::default()
            },
        )
        .unwrap();

        assert_eq!(with.rows()[0].text(), "  G  C  E  A ");
        assert_eq!(with.rows().len(), without.rows().len() + 1);
        assert_eq!(without.rows()[0].kind, RowKind::Top);
    }

    #[test]
    fn test_no_label_when_numbers_hidden() {
        let chord = ChordDefinition::open(&guitar()).with_full_barre(5).unwrap();
        let options = DisplayOptions {
            show_fret_numbers: false,
            ..DisplayOptions::default()
        };
        let diagram = render(&guitar(), &chord, options).unwrap();
        assert!(diagram.rows().iter().all(|r| r.label().is_none()));
        // still a floating window
        assert_eq!(diagram.rows()[1].text(), "  ┌──┬──┬──┬──┬──┐ ");
    }

    #[test]
    fn test_render_is_deterministic() {
        let chord = ChordDefinition::open(&guitar()).with_full_barre(5).unwrap();
        let first = render(&guitar(), &chord, DisplayOptions::default()).unwrap();
        let second = render(&guitar(), &chord, DisplayOptions::default()).unwrap();
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(content(&second, 0), "  ◉━━━━━━━━━━━━━━◉ ");
    }

    #[test]
    fn test_errors() {
        let uke_chord = ChordDefinition::open(&Instrument::ukulele());
        let err = render(&guitar(), &uke_chord, DisplayOptions::default()).unwrap_err();
        assert!(matches!(err, ChordError::InvalidChordDefinition(_)));

        let wide = ChordDefinition::new(
            &guitar(),
            vec![Fretted(1), Open, Open, Open, Open, Fretted(6)],
        )
        .unwrap();
        let err = render(&guitar(), &wide, DisplayOptions::default()).unwrap_err();
        assert!(matches!(err, ChordError::UnsupportedFretSpan { .. }));
    }

    #[test]
    fn test_title_and_name() {
        let chord = ChordDefinition::open(&Instrument::ukulele()).named("C6");
        let diagram = render(&Instrument::ukulele(), &chord, DisplayOptions::default()).unwrap();
        assert_eq!(diagram.title(), "Ukulele Chord");
        assert_eq!(diagram.name(), Some("C6"));
    }
}
