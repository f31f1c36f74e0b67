//! Colors and text styles for the reader screen.

use ratatui::style::{Color, Modifier, Style};

// ============================================================
// COLORS
// ============================================================

/// Status line text
pub const STATUS_GRAY: Color = Color::Rgb(0x77, 0x77, 0x77); // #777777

/// Pivot letter highlight
pub const PIVOT_RED: Color = Color::Rgb(0xFF, 0x3B, 0x30); // #FF3B30

// ============================================================
// STYLES
// ============================================================

/// Style for the pivot letter of the displayed word.
pub fn pivot() -> Style {
    Style::default().fg(PIVOT_RED).add_modifier(Modifier::BOLD)
}

/// Style for the status line.
pub fn status() -> Style {
    Style::default().fg(STATUS_GRAY)
}

/// Style for the error indicator inside the status line.
pub fn status_error() -> Style {
    Style::default().fg(PIVOT_RED)
}
