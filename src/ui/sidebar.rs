//! Sidebar topic navigator.
//!
//! Renders the catalog's topic titles as a selectable list. The active
//! topic is highlighted with the accent color, the cursor row with the
//! selection style. A title filter, when set, narrows the list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;

/// Render the topic list into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_topics();

    let items: Vec<ListItem> = filtered
        .iter()
        .map(|(_, topic)| {
            let style = if topic.id == app.active_topic_id() {
                Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} ", topic.title)).style(style)
        })
        .collect();

    let title = if app.filter_active || !app.filter_text.is_empty() {
        format!(" SQL Tutorial | /{} ", app.filter_text)
    } else {
        " SQL Tutorial ".to_string()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("❯");

    let mut state = ListState::default();
    if !filtered.is_empty() {
        state.select(Some(app.sidebar_index.min(filtered.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
