//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: answers, picked topics, saved confirmations
//! - Yellow: status messages and refused actions
//! - Cyan: interactive elements (keybinding hints, enabled actions)
//! - Dim: de-emphasized (counters, counts, disabled actions)
//! - Bold: the prompt itself, file and topic names

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Revealed answer, success.
pub const STYLE_ANSWER: Style = Style::new().fg(Color::Green);

/// Status line / attention needed.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Interactive element / keybinding hint.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Checkbox: checked.
pub const STYLE_CHECKED: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Checkbox: unchecked.
pub const STYLE_UNCHECKED: Style = Style::new().fg(Color::DarkGray);

/// Focused form field label.
pub const STYLE_FOCUSED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
