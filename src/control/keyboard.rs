// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Provides configurable keyboard bindings for display toggles and
//! navigation. By default `f`, `t`, `n` toggle the
//! diagram parts, `c` toggles the key hints, `q` quits.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use super::ControlAction;

/// A keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    ///
    /// Shift is dropped for character keys since the character already
    /// carries it ('?' rather than Shift+'/').
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Parse a shortcut such as "f", "ctrl+r", "shift+up" or "pagedown"
    pub fn parse(text: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;

        for part in text.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ if code.is_some() => bail!("Shortcut {:?} names more than one key", text),
                _ => code = Some(parse_key(part)?),
            }
        }

        code.map(|code| Self::new(code, modifiers))
            .ok_or_else(|| anyhow!("Shortcut {:?} has no key", text))
    }
}

fn parse_key(key: &str) -> Result<KeyCode> {
    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..]
                .parse()
                .map_err(|_| anyhow!("Unknown key {:?}", key))?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => bail!("Unknown key {:?}", key),
            }
        }
    };
    Ok(code)
}

/// A key binding with description
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// Action to perform
    pub action: ControlAction,
    /// Human-readable description
    pub description: String,
    /// Help section
    pub category: String,
}

impl KeyBinding {
    /// Create a new binding in the "General" category
    pub fn new(shortcut: Shortcut, action: ControlAction, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
            category: "General".to_string(),
        }
    }

    /// Set the category
    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    /// Add default keyboard bindings
    fn add_default_bindings(&mut self) {
        use ControlAction::*;

        let defaults = [
            (Shortcut::key(KeyCode::Char('f')), ToggleFingers, "Toggle Fingers", "Display"),
            (Shortcut::key(KeyCode::Char('t')), ToggleTuning, "Toggle Tuning", "Display"),
            (Shortcut::key(KeyCode::Char('n')), ToggleFretNumbers, "Toggle Fret Numbers", "Display"),
            (Shortcut::key(KeyCode::Up), ScrollUp, "Scroll Up", "Navigation"),
            (Shortcut::key(KeyCode::Char('k')), ScrollUp, "Scroll Up", "Navigation"),
            (Shortcut::key(KeyCode::Down), ScrollDown, "Scroll Down", "Navigation"),
            (Shortcut::key(KeyCode::Char('j')), ScrollDown, "Scroll Down", "Navigation"),
            (Shortcut::key(KeyCode::PageUp), PageUp, "Page Up", "Navigation"),
            (Shortcut::key(KeyCode::PageDown), PageDown, "Page Down", "Navigation"),
            (Shortcut::key(KeyCode::Home), ScrollHome, "Top", "Navigation"),
            (Shortcut::key(KeyCode::Char('c')), ToggleControls, "Toggle Controls", "UI"),
            (Shortcut::key(KeyCode::Char('?')), ToggleHelp, "Toggle Help", "UI"),
            (Shortcut::key(KeyCode::Char('h')), ToggleHelp, "Toggle Help", "UI"),
            (Shortcut::key(KeyCode::Char('r')), ReloadLibrary, "Reload Library", "UI"),
            (Shortcut::key(KeyCode::Char('q')), Quit, "Quit", "UI"),
            (Shortcut::ctrl(KeyCode::Char('c')), Quit, "Quit", "UI"),
        ];

        for (shortcut, action, description, category) in defaults {
            self.add(KeyBinding::new(shortcut, action, description).category(category));
        }
    }

    /// Add or replace bindings from settings (shortcut text to action name)
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<()> {
        for (shortcut_text, action_name) in overrides {
            let shortcut = Shortcut::parse(shortcut_text)?;
            let action = ControlAction::from_name(action_name)
                .ok_or_else(|| anyhow!("Unknown action {:?} for {:?}", action_name, shortcut_text))?;

            debug!(shortcut = %shortcut_text, action = action.name(), "custom key binding");
            let description = self
                .bindings
                .values()
                .find(|b| b.action == action)
                .map(|b| b.description.clone())
                .unwrap_or_else(|| action.name().to_string());
            self.add(KeyBinding::new(shortcut, action, description).category("Custom"));
        }
        Ok(())
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Get action for a key event
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<ControlAction> {
        let shortcut = Shortcut::new(code, modifiers);
        self.bindings.get(&shortcut).map(|b| b.action)
    }

    /// Get bindings grouped by category
    pub fn bindings_by_category(&self) -> HashMap<String, Vec<&KeyBinding>> {
        let mut grouped: HashMap<String, Vec<&KeyBinding>> = HashMap::new();

        for binding in self.bindings.values() {
            grouped
                .entry(binding.category.clone())
                .or_default()
                .push(binding);
        }

        grouped
    }

    /// Shortcuts bound to an action, formatted, shortest first
    pub fn keys_for(&self, action: ControlAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .values()
            .filter(|b| b.action == action)
            .map(|b| format_shortcut(&b.shortcut))
            .collect();
        keys.sort_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));
        keys
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let mut parts = Vec::new();

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if shortcut.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}
