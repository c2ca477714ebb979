//! Common UI components shared across panes.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

/// Render the header bar: application name, active topic, theme label.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" QueryDocs ", app.theme.title),
        Span::raw("│ "),
        Span::raw(app.active_topic().title.clone()),
        Span::styled(
            format!("  ({} topics, {} theme)", app.catalog().len(), app.theme.label()),
            Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Priority order: copy feedback, then temporary status messages, then the
/// context-sensitive key hints. The active topic id is always echoed in
/// fragment form so the persisted location is visible.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(key) = app.copied_key() {
        let line = Line::from(vec![
            Span::styled(" ✓ copied ", app.theme.copied),
            Span::styled(key.to_string(), Style::default().fg(app.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(msg) = app.status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.accent));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = if app.filter_active {
        "Type to filter | Enter:apply Esc:cancel"
    } else {
        match app.focus {
            Focus::Sidebar => "↑↓/jk:topics Enter:open /:filter Tab:content t:theme ?:help q:quit",
            Focus::Content => "↑↓/jk:scroll n/p:code block y:copy Tab:topics t:theme ?:help q:quit",
        }
    };

    let status = format!(" #{} | {}", app.active_topic_id(), controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.title)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Move topic cursor / scroll"),
        Line::from("  Tab         Switch pane focus"),
        Line::from("  Enter       Open topic / copy code"),
        Line::from("  PgUp/PgDn   Jump 10 lines or rows"),
        Line::from("  g/G         Jump to first/last"),
        Line::from("  s           Toggle sidebar"),
        Line::from("  Esc         Close sidebar, clear filter"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Topics",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /           Filter topics by title"),
        Line::from("  c           Clear filter"),
        Line::from("  r           Reload a file-backed catalog"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Code blocks",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  n/p         Next/previous code block"),
        Line::from("  y           Copy selected block"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  t           Toggle dark/light theme"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
