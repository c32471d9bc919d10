//! TUI theme and styles

use ratatui::style::{Color, Modifier, Style};

/// Editor color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Focus color
    pub const FOCUS: Color = Color::Yellow;

    /// Success color
    pub const SUCCESS: Color = Color::Green;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border style of the focused field
    pub fn focused() -> Style {
        Style::default().fg(Self::FOCUS)
    }

    /// Focused submit button
    pub fn submit() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Self::MUTED)
    }

    /// Validation error style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }
}
