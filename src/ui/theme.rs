//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Which of the two fixed themes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Color and style theme for the viewer.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which fixed theme this is; toggling flips between the two.
    pub mode: ThemeMode,
    /// Accent color for highlights and the active topic.
    pub accent: Color,
    /// Color for secondary text (hints, labels).
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the application and topic titles.
    pub title: Style,
    /// Style for the sidebar row under the cursor.
    pub selected: Style,
    /// Style for code block bodies.
    pub code: Style,
    /// Style for code block header lines (language label, hints).
    pub code_label: Style,
    /// Style for the transient "copied" indicator.
    pub copied: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            accent: Color::Cyan,
            muted: Color::Gray,
            border: Color::DarkGray,
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::LightGreen),
            code_label: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            copied: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            accent: Color::Blue,
            muted: Color::DarkGray,
            border: Color::Gray,
            title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Green),
            code_label: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            copied: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// The opposite theme, for the theme toggle.
    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        }
    }

    /// Display label for the header.
    pub fn label(&self) -> &'static str {
        match self.mode {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}
