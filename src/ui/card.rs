// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord cards: a rendered diagram inside a titled box, as styled lines.
//!
//! Cards are plain lines rather than nested widgets so a whole column can
//! be scrolled as one paragraph.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::diagram::render::{BARRE_GLYPH, FINGER_GLYPH};
use crate::diagram::{ChordError, Diagram};

/// Room beside the grid for a fret label
pub const LABEL_GUTTER: usize = 3;

const BARRE_CONNECTOR: char = '━';

/// Outer width of a card for a diagram row width
pub fn card_width(row_width: usize) -> usize {
    row_width + LABEL_GUTTER + 2
}

/// Lines for a successfully rendered diagram
pub fn diagram_card(diagram: &Diagram) -> Vec<Line<'static>> {
    let inner = diagram.width() + LABEL_GUTTER;
    let mut lines = Vec::with_capacity(diagram.rows().len() + 3);

    lines.push(top_border(diagram.title(), inner));
    if let Some(name) = diagram.name() {
        lines.push(framed(
            vec![Span::styled(
                fit(name, inner),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )],
            inner,
        ));
    }

    for row in diagram.rows() {
        let mut spans = grid_spans(row.text());
        if let Some(label) = row.label() {
            spans.push(Span::styled(
                label.to_string(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(framed(spans, inner));
    }

    lines.push(bottom_border(inner));
    lines
}

/// Lines for a chord that could not be rendered
pub fn error_card(title: &str, name: &str, error: &ChordError, row_width: usize) -> Vec<Line<'static>> {
    let inner = row_width + LABEL_GUTTER;
    let mut lines = vec![
        top_border(title, inner),
        framed(
            vec![Span::styled(
                fit(name, inner),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )],
            inner,
        ),
    ];

    let message: Vec<char> = error.to_string().chars().collect();
    for chunk in message.chunks(inner.max(1)) {
        lines.push(framed(
            vec![Span::styled(
                chunk.iter().collect::<String>(),
                Style::default().fg(Color::Red),
            )],
            inner,
        ));
    }

    lines.push(bottom_border(inner));
    lines
}

fn top_border(title: &str, inner: usize) -> Line<'static> {
    let title = fit(&format!(" {} ", title), inner.saturating_sub(1));
    let fill = inner.saturating_sub(1 + title.chars().count());
    Line::from(vec![
        Span::styled("╭─", border_style()),
        Span::styled(title, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{}╮", "─".repeat(fill)), border_style()),
    ])
}

fn bottom_border(inner: usize) -> Line<'static> {
    Line::from(Span::styled(format!("╰{}╯", "─".repeat(inner)), border_style()))
}

/// Wrap spans in side borders, padding to the inner width
fn framed(mut spans: Vec<Span<'static>>, inner: usize) -> Line<'static> {
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    spans.insert(0, Span::styled("│", border_style()));
    spans.push(Span::raw(" ".repeat(inner.saturating_sub(used))));
    spans.push(Span::styled("│", border_style()));
    Line::from(spans)
}

/// Split grid text into runs styled by glyph
fn grid_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = None;

    for c in text.chars() {
        let style = glyph_style(c);
        if run_style != Some(style) && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style.unwrap_or_default()));
    }
    spans
}

fn glyph_style(c: char) -> Style {
    match c {
        FINGER_GLYPH => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        BARRE_GLYPH | BARRE_CONNECTOR => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Gray),
    }
}

fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Truncate to a character count
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{render, ChordDefinition, DisplayOptions, Instrument};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines_share_width() {
        let guitar = Instrument::guitar();
        let chord = ChordDefinition::open(&guitar).with_full_barre(5).unwrap().named("A");
        let diagram = render(&guitar, &chord, DisplayOptions::default()).unwrap();

        let lines = diagram_card(&diagram);
        let width = card_width(diagram.width());
        for line in &lines {
            assert_eq!(line_text(line).chars().count(), width, "{:?}", line_text(line));
        }
        assert!(line_text(&lines[0]).contains("Guitar Chord"));
        assert!(line_text(&lines[1]).contains('A'));
        assert!(lines.iter().any(|l| line_text(l).ends_with("┤ 5  │")));
    }

    #[test]
    fn test_grid_spans_split_on_glyphs() {
        let spans = grid_spans("  │  ●  │ ");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "●");
        assert_eq!(spans[1].style, glyph_style(FINGER_GLYPH));
    }

    #[test]
    fn test_error_card() {
        let err = ChordError::UnsupportedFretSpan {
            lowest: 1,
            highest: 9,
            window: 4,
        };
        let lines = error_card("Ukulele Chord", "Stretch", &err, 13);
        let width = card_width(13);
        assert!(lines.len() > 3);
        for line in &lines {
            assert_eq!(line_text(line).chars().count(), width);
        }
        let body: String = lines.iter().map(line_text).collect();
        assert!(body.contains("Stretch"));
        assert!(body.contains("spans"));
    }
}
