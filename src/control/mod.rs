// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input.
//!
//! Key presses are mapped to [`ControlAction`]s; the UI applies them to its
//! own state (display toggles, scroll position).

pub mod keyboard;

pub use keyboard::{format_shortcut, KeyBinding, KeyboardController, Shortcut};

/// Action that can be triggered by controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    // Display
    /// Show or hide finger markers
    ToggleFingers,
    /// Show or hide the string-name row
    ToggleTuning,
    /// Show or hide fret numbers
    ToggleFretNumbers,

    // UI
    /// Show or hide the key hint footer
    ToggleControls,
    /// Toggle help display
    ToggleHelp,
    /// Re-read the chord library file
    ReloadLibrary,
    /// Quit application
    Quit,

    // Navigation
    /// Scroll one line up
    ScrollUp,
    /// Scroll one line down
    ScrollDown,
    /// Scroll one page up
    PageUp,
    /// Scroll one page down
    PageDown,
    /// Back to the top
    ScrollHome,
}

impl ControlAction {
    /// Every action, in help order
    pub const ALL: [ControlAction; 12] = [
        ControlAction::ToggleFingers,
        ControlAction::ToggleTuning,
        ControlAction::ToggleFretNumbers,
        ControlAction::ToggleControls,
        ControlAction::ToggleHelp,
        ControlAction::ReloadLibrary,
        ControlAction::Quit,
        ControlAction::ScrollUp,
        ControlAction::ScrollDown,
        ControlAction::PageUp,
        ControlAction::PageDown,
        ControlAction::ScrollHome,
    ];

    /// Name used in settings files
    pub fn name(self) -> &'static str {
        match self {
            ControlAction::ToggleFingers => "toggle_fingers",
            ControlAction::ToggleTuning => "toggle_tuning",
            ControlAction::ToggleFretNumbers => "toggle_fret_numbers",
            ControlAction::ToggleControls => "toggle_controls",
            ControlAction::ToggleHelp => "toggle_help",
            ControlAction::ReloadLibrary => "reload_library",
            ControlAction::Quit => "quit",
            ControlAction::ScrollUp => "scroll_up",
            ControlAction::ScrollDown => "scroll_down",
            ControlAction::PageUp => "page_up",
            ControlAction::PageDown => "page_down",
            ControlAction::ScrollHome => "scroll_home",
        }
    }

    /// Look up an action by its settings name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }

    /// Check if this action changes display options
    pub fn is_display_toggle(&self) -> bool {
        matches!(
            self,
            ControlAction::ToggleFingers
                | ControlAction::ToggleTuning
                | ControlAction::ToggleFretNumbers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in ControlAction::ALL {
            assert_eq!(ControlAction::from_name(action.name()), Some(action));
        }
        assert_eq!(ControlAction::from_name("launch_rockets"), None);
    }

    #[test]
    fn test_display_toggles() {
        assert!(ControlAction::ToggleFingers.is_display_toggle());
        assert!(!ControlAction::ToggleControls.is_display_toggle());
    }
}
