// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for browsing chord diagrams.
//!
//! Provides a ratatui-based interface: a scrollable panel with one column
//! per chord group, a footer with key hints and a help overlay. Every frame
//! renders the diagrams again from the current display options.

mod card;

pub use card::{card_width, diagram_card, error_card, LABEL_GUTTER};

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use crate::config::{ChordLibrary, Chordbook, LibraryEvent, LibraryWatcher};
use crate::control::{format_shortcut, ControlAction, KeyboardController};
use crate::diagram::{render, row_width, DisplayOptions};

/// Lines moved by page up/down
const PAGE_STEP: u16 = 10;

/// Seconds a status message stays visible
const STATUS_SECS: u64 = 3;

/// UI state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Current display toggles, passed to every render
    pub options: DisplayOptions,
    /// Chords being shown
    pub book: Chordbook,
    /// Where the chords came from, for the header
    pub source: String,
    /// First visible line of the chord panel
    pub scroll: u16,
    /// Key hint footer visible
    pub show_controls: bool,
    /// Help text visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl UiState {
    /// Create state for a chordbook
    pub fn new(book: Chordbook, options: DisplayOptions, source: impl Into<String>) -> Self {
        Self {
            options,
            book,
            source: source.into(),
            scroll: 0,
            show_controls: true,
            show_help: false,
            status_message: None,
            status_time: None,
        }
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(STATUS_SECS) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }

    /// Swap in a reloaded chordbook
    pub fn replace_book(&mut self, book: Chordbook) {
        let count = book.chord_count();
        let failed = book.errors().count();
        self.book = book;
        if failed > 0 {
            self.set_status(format!("Library reloaded: {} chords, {} invalid", count, failed));
        } else {
            self.set_status(format!("Library reloaded: {} chords", count));
        }
    }

    /// Apply an action that only touches UI state
    ///
    /// Quit and library reloads need the app and are ignored here.
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::ToggleFingers => {
                let on = self.options.toggle_fingers();
                self.set_status(format!("Fingers {}", on_off(on)));
            }
            ControlAction::ToggleTuning => {
                let on = self.options.toggle_tuning();
                self.set_status(format!("Tuning {}", on_off(on)));
            }
            ControlAction::ToggleFretNumbers => {
                let on = self.options.toggle_fret_numbers();
                self.set_status(format!("Fret numbers {}", on_off(on)));
            }
            ControlAction::ToggleControls => self.show_controls = !self.show_controls,
            ControlAction::ToggleHelp => self.show_help = !self.show_help,
            ControlAction::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            ControlAction::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            ControlAction::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_STEP),
            ControlAction::PageDown => self.scroll = self.scroll.saturating_add(PAGE_STEP),
            ControlAction::ScrollHome => self.scroll = 0,
            ControlAction::ReloadLibrary | ControlAction::Quit => {}
        }
    }

    /// Render every chord with the current options, one line list per group
    pub fn columns(&self) -> Vec<(String, Vec<Line<'static>>)> {
        let instrument = &self.book.instrument;
        let width = row_width(instrument.string_count());

        self.book
            .groups
            .iter()
            .map(|group| {
                let mut lines = Vec::new();
                for slot in &group.chords {
                    let card = match &slot.chord {
                        Ok(chord) => match render(instrument, chord, self.options) {
                            Ok(diagram) => diagram_card(&diagram),
                            Err(e) => error_card(&instrument.title(), &slot.name, &e, width),
                        },
                        Err(e) => error_card(&instrument.title(), &slot.name, e, width),
                    };
                    lines.extend(card);
                }
                (group.title.clone(), lines)
            })
            .collect()
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

/// Terminal UI application
pub struct App {
    state: UiState,
    keyboard: KeyboardController,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Library file, `None` for the built-in library
    library_path: Option<PathBuf>,
    watcher: Option<LibraryWatcher>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Create a new app and take over the terminal
    pub fn new(
        state: UiState,
        keyboard: KeyboardController,
        library_path: Option<PathBuf>,
        watcher: Option<LibraryWatcher>,
    ) -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = or_restore(enter_terminal(), restore_terminal)?;

        Ok(Self {
            state,
            keyboard,
            terminal,
            library_path,
            watcher,
            frame_rate: 30,
            running: true,
        })
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Run the event loop until quit
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.state.clear_expired_status();
            self.poll_library();
            self.draw().context("Failed to draw UI")?;

            if let Some(Event::Key(key)) = self.poll_event().context("Failed to read input")? {
                if key.kind != KeyEventKind::Release {
                    if let Some(action) = self.keyboard.get_action(key.code, key.modifiers) {
                        self.handle_action(action);
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply an action
    pub fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::Quit => {
                info!("quit requested");
                self.quit();
            }
            ControlAction::ReloadLibrary => self.reload_library(),
            other => {
                if other.is_display_toggle() {
                    debug!(action = other.name(), "display toggled");
                }
                self.state.apply(other);
            }
        }
    }

    fn reload_library(&mut self) {
        let library = ChordLibrary::load_or_builtin(self.library_path.as_deref());
        match library.and_then(|l| l.build()) {
            Ok(book) => {
                info!(chords = book.chord_count(), "library reloaded");
                self.state.replace_book(book);
            }
            Err(e) => {
                warn!(error = %e, "library reload failed");
                self.state.set_status(format!("Reload failed: {:#}", e));
            }
        }
    }

    fn poll_library(&mut self) {
        let events = match &self.watcher {
            Some(watcher) => watcher.recv_all(),
            None => return,
        };

        for event in events {
            match event {
                LibraryEvent::Reloaded(library) => match library.build() {
                    Ok(book) => {
                        info!(chords = book.chord_count(), "library changed on disk");
                        self.state.replace_book(book);
                    }
                    Err(e) => self.state.set_status(format!("Reload failed: {:#}", e)),
                },
                LibraryEvent::Error(message) => self.state.set_status(message),
                LibraryEvent::FileDeleted(path) => {
                    self.state.set_status(format!("Library {:?} was deleted", path));
                }
                LibraryEvent::FileCreated(_) => {}
            }
        }
    }

    /// Poll for events with timeout
    fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let state = &mut self.state;
        let keyboard = &self.keyboard;
        self.terminal.draw(|frame| draw_ui(frame, state, keyboard))?;
        Ok(())
    }

    /// Restore the terminal
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Switch to the alternate screen and wrap stdout in a terminal
fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo raw mode and the alternate screen when setup stopped half way
fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run `restore` if `result` is an error, then hand the result back
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Draw the whole UI into a frame
///
/// Clamps the scroll offset to the content height.
pub fn draw_ui(frame: &mut Frame, state: &mut UiState, keyboard: &KeyboardController) {
    let area = frame.area();
    let show_footer = state.show_controls || state.status_message.is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                 // Header
            Constraint::Min(3),                                    // Chords
            Constraint::Length(if show_footer { 1 } else { 0 }),  // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], state);
    render_chords(frame, chunks[1], state);
    if show_footer {
        render_footer(frame, chunks[2], state, keyboard);
    }

    if state.show_help {
        render_help_overlay(frame, area, keyboard);
    }
}

/// Render header line
fn render_header(frame: &mut Frame, area: Rect, state: &UiState) {
    let line = Line::from(vec![
        Span::styled(
            " Chord Display ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} · {}", state.book.instrument.label(), state.source),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the scrollable chord panel
fn render_chords(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let block = Block::default().borders(Borders::ALL).title(" Chords ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = state.columns();
    if columns.is_empty() {
        let empty = Paragraph::new("No chords in library").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    // subtitle + blank line above each column's cards
    let content_height = columns
        .iter()
        .map(|(_, lines)| lines.len() + 2)
        .max()
        .unwrap_or(0) as u16;
    let max_scroll = content_height.saturating_sub(inner.height);
    state.scroll = state.scroll.min(max_scroll);

    let width = card_width(row_width(state.book.instrument.string_count())) as u16;
    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Length(width + 2))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for ((title, cards), column) in columns.into_iter().zip(column_areas.iter()) {
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(cards);

        let widget = Paragraph::new(lines).scroll((state.scroll, 0));
        frame.render_widget(widget, column.inner(Margin::new(1, 0)));
    }
}

/// Render the footer: status message or key hints
fn render_footer(frame: &mut Frame, area: Rect, state: &UiState, keyboard: &KeyboardController) {
    let line = if let Some(ref msg) = state.status_message {
        Line::from(Span::styled(format!(" {}", msg), Style::default().fg(Color::Yellow)))
    } else {
        let mut spans = Vec::new();
        for action in [
            ControlAction::ToggleFingers,
            ControlAction::ToggleTuning,
            ControlAction::ToggleFretNumbers,
            ControlAction::ToggleControls,
            ControlAction::ToggleHelp,
            ControlAction::Quit,
        ] {
            if let Some(key) = keyboard.keys_for(action).into_iter().next() {
                spans.push(Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Black).bg(Color::DarkGray),
                ));
                spans.push(Span::styled(
                    format!(" {} ", hint_label(action)),
                    Style::default().fg(Color::Gray),
                ));
            }
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn hint_label(action: ControlAction) -> &'static str {
    match action {
        ControlAction::ToggleFingers => "Fingers",
        ControlAction::ToggleTuning => "Tuning",
        ControlAction::ToggleFretNumbers => "Fret Numbers",
        ControlAction::ToggleControls => "Controls",
        ControlAction::ToggleHelp => "Help",
        ControlAction::Quit => "Quit",
        other => other.name(),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, keyboard: &KeyboardController) {
    let grouped = keyboard.bindings_by_category();
    let mut categories: Vec<&String> = grouped.keys().collect();
    categories.sort_by_key(|c| match c.as_str() {
        "Display" => 0,
        "Navigation" => 1,
        "UI" => 2,
        _ => 3,
    });

    let mut help_text = Vec::new();
    for category in categories {
        if !help_text.is_empty() {
            help_text.push(Line::from(""));
        }
        help_text.push(Line::from(Span::styled(
            category.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let mut entries: Vec<(String, &str)> = grouped[category]
            .iter()
            .map(|b| (format_shortcut(&b.shortcut), b.description.as_str()))
            .collect();
        entries.sort();
        for (key, description) in entries {
            help_text.push(Line::from(format!("  {:<12}{}", key, description)));
        }
    }

    let width = 44.min(area.width.saturating_sub(4));
    let height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);
    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn state() -> UiState {
        let book = ChordLibrary::builtin().unwrap().build().unwrap();
        UiState::new(book, DisplayOptions::default(), "built-in")
    }

    fn screen(state: &mut UiState, width: u16, height: u16) -> String {
        let keyboard = KeyboardController::with_defaults();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_ui(frame, state, &keyboard)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: io::Result<()> =
            or_restore(Err(io::Error::new(io::ErrorKind::Other, "no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        assert_eq!(or_restore(Ok(7), || restored = true).unwrap(), 7);
        assert!(!restored);
    }

    #[test]
    fn test_toggle_actions() {
        let mut state = state();
        state.apply(ControlAction::ToggleFingers);
        assert!(!state.options.show_fingers);
        assert_eq!(state.status_message.as_deref(), Some("Fingers off"));

        state.apply(ControlAction::ToggleTuning);
        state.apply(ControlAction::ToggleFretNumbers);
        assert_eq!(state.options, DisplayOptions::bare());

        state.apply(ControlAction::ToggleControls);
        assert!(!state.show_controls);
        state.apply(ControlAction::ToggleHelp);
        assert!(state.show_help);
    }

    #[test]
    fn test_scroll_actions() {
        let mut state = state();
        state.apply(ControlAction::ScrollUp);
        assert_eq!(state.scroll, 0);
        state.apply(ControlAction::PageDown);
        state.apply(ControlAction::ScrollDown);
        assert_eq!(state.scroll, PAGE_STEP + 1);
        state.apply(ControlAction::ScrollHome);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_columns_follow_options() {
        let mut state = state();
        let with_fingers: String = state
            .columns()
            .iter()
            .flat_map(|(_, lines)| lines.iter())
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(with_fingers.contains('●'));

        state.apply(ControlAction::ToggleFingers);
        let without: String = state
            .columns()
            .iter()
            .flat_map(|(_, lines)| lines.iter())
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(!without.contains('●'));
        assert!(without.contains('◉'));
    }

    #[test]
    fn test_draw_shows_groups_and_titles() {
        let mut state = state();
        let text = screen(&mut state, 120, 40);
        assert!(text.contains("Chord Display"));
        assert!(text.contains("Major Chords"));
        assert!(text.contains("Minor Chords"));
        assert!(text.contains("Guitar Chord"));
        assert!(text.contains("Fingers"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = state();
        state.scroll = u16::MAX;
        screen(&mut state, 120, 40);
        assert!(state.scroll < u16::MAX);

        // everything fits on a tall screen
        state.scroll = 5;
        screen(&mut state, 120, 400);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_help_overlay() {
        let mut state = state();
        state.apply(ControlAction::ToggleHelp);
        let text = screen(&mut state, 120, 40);
        assert!(text.contains("Help"));
        assert!(text.contains("Toggle Fret Numbers"));
    }

    #[test]
    fn test_replace_book_reports_status() {
        let mut state = state();
        let book = state.book.clone();
        state.replace_book(book);
        assert!(state.status_message.unwrap().starts_with("Library reloaded"));
    }
}
