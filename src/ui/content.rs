//! Content pane rendering.
//!
//! Renders the active topic as a vertical sequence of prose paragraphs and
//! code blocks. Each code block gets a header line carrying its language
//! label, the copy hint when the block is under the copy cursor, and the
//! transient "copied" indicator after a successful copy.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::content::{copy_key, paragraphs, Segment};

/// Render the active topic into `area`, clamping the scroll offset to the
/// rendered line count.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.active_topic().title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let lines = build_lines(app);

    // Clamp against the unwrapped line count; long lines wrap below this
    // bound, which only leaves the last page partially scrollable.
    let max_scroll = (lines.len().min(u16::MAX as usize) as u16).saturating_sub(inner.height);
    app.scroll = app.scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Flatten the active topic's segments into styled lines.
fn build_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let copied = app.copied_key().map(str::to_string);
    let mut code_ordinal = 0usize;

    for segment in app.segments() {
        match segment {
            Segment::Text { content } => {
                for para in paragraphs(content) {
                    for line in para.lines() {
                        lines.push(Line::raw(line.to_string()));
                    }
                    lines.push(Line::raw(""));
                }
            }
            Segment::Code { language, content } => {
                let selected = code_ordinal == app.code_cursor;
                let key = copy_key(app.active_topic_id(), code_ordinal);

                let mut header = vec![
                    Span::styled(
                        if selected { "❯ " } else { "  " },
                        Style::default().fg(app.theme.accent),
                    ),
                    Span::styled(format!("── {} ── ", language.as_str()), app.theme.code_label),
                ];
                if copied.as_deref() == Some(key.as_str()) {
                    header.push(Span::styled("✓ copied", app.theme.copied));
                } else if selected {
                    header.push(Span::styled("y to copy", app.theme.code_label));
                }
                lines.push(Line::from(header));

                for line in content.lines() {
                    lines.push(Line::from(Span::styled(format!("  {line}"), app.theme.code)));
                }
                lines.push(Line::raw(""));
                code_ordinal += 1;
            }
        }
    }

    lines
}
