use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Focus};
use crate::ui::{NARROW_BREAKPOINT, SIDEBAR_WIDTH};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Theme and sidebar
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('s') => app.toggle_sidebar(),

        // Pane focus
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Left | KeyCode::Char('h') => app.focus = Focus::Sidebar,
        KeyCode::Right | KeyCode::Char('l') => app.focus = Focus::Content,

        // Filter (start typing to narrow the topic list)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Reload a file-backed catalog
        KeyCode::Char('r') => app.reload(),

        // Code block cursor and copy
        KeyCode::Char('n') | KeyCode::Char(']') => app.next_code_block(),
        KeyCode::Char('p') | KeyCode::Char('[') => app.prev_code_block(),
        KeyCode::Char('y') => app.request_copy(),

        // Navigation within the focused pane
        KeyCode::Up | KeyCode::Char('k') => match app.focus {
            Focus::Sidebar => app.select_prev_n(1),
            Focus::Content => app.scroll_up(1),
        },
        KeyCode::Down | KeyCode::Char('j') => match app.focus {
            Focus::Sidebar => app.select_next_n(1),
            Focus::Content => app.scroll_down(1),
        },
        KeyCode::PageUp => match app.focus {
            Focus::Sidebar => app.select_prev_n(10),
            Focus::Content => app.scroll_up(10),
        },
        KeyCode::PageDown => match app.focus {
            Focus::Sidebar => app.select_next_n(10),
            Focus::Content => app.scroll_down(10),
        },
        KeyCode::Home | KeyCode::Char('g') => match app.focus {
            Focus::Sidebar => app.select_first(),
            Focus::Content => app.scroll_top(),
        },
        KeyCode::End | KeyCode::Char('G') => match app.focus {
            Focus::Sidebar => app.select_last(),
            Focus::Content => app.scroll_bottom(),
        },

        // Open the topic under the cursor, or copy when reading content
        KeyCode::Enter => match app.focus {
            Focus::Sidebar => app.activate_selected(),
            Focus::Content => app.request_copy(),
        },

        // Go back: close the sidebar overlay first, then drop the filter
        KeyCode::Esc => {
            if app.sidebar_open {
                app.close_sidebar();
            } else if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, width: u16) {
    let sidebar_visible = width >= NARROW_BREAKPOINT || app.sidebar_open;
    let in_sidebar = sidebar_visible && mouse.column < SIDEBAR_WIDTH;

    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            if in_sidebar {
                app.select_prev_n(1);
            } else {
                app.scroll_up(2);
            }
        }
        MouseEventKind::ScrollDown => {
            if in_sidebar {
                app.select_next_n(1);
            } else {
                app.scroll_down(2);
            }
        }

        // Click to select a topic
        MouseEventKind::Down(MouseButton::Left) => {
            if in_sidebar {
                // Header (1) plus the sidebar block border (1); list rows
                // start below. Approximate: list scrolling is not accounted.
                if mouse.row >= 2 {
                    let item_row = (mouse.row - 2) as usize;
                    if item_row < app.filtered_topics().len() {
                        app.sidebar_index = item_row;
                        app.activate_selected();
                    }
                }
            } else {
                app.focus = Focus::Content;
            }
        }

        _ => {}
    }
}
