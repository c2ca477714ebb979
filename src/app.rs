//! Application state and interaction logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::clipboard::ClipboardSink;
use crate::content::{copy_key, segment, Catalog, Segment, Topic};
use crate::session::SessionStore;
use crate::ui::Theme;

/// How long the per-block "copied" indicator stays visible.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1600);

/// How long transient status-bar messages stay visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Which pane owns keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The topic list.
    Sidebar,
    /// The rendered topic content.
    Content,
}

impl Focus {
    /// Switch to the other pane.
    pub fn toggled(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
        }
    }
}

/// Main application state.
///
/// Owns the view state described by the catalog contract: the active topic
/// id always resolves to a catalog entry (unknown ids fall back to the
/// first topic), segments are recomputed whenever the active id changes,
/// and the copied indicator clears itself 1600 ms after a successful copy
/// unless a newer copy has replaced it first.
pub struct App {
    pub running: bool,
    pub theme: Theme,
    pub sidebar_open: bool,
    pub focus: Focus,
    pub show_help: bool,

    catalog: Catalog,
    catalog_path: Option<PathBuf>,
    session: Option<SessionStore>,
    clipboard: Box<dyn ClipboardSink>,

    active_topic_id: String,
    segments: Vec<Segment>,

    // Navigation state
    pub sidebar_index: usize,
    pub scroll: u16,
    pub code_cursor: usize,

    // Transient copy indicator: key plus the instant it was set
    copied: Option<(String, Instant)>,

    // Sidebar title filter
    pub filter_text: String,
    pub filter_active: bool,

    // Status message (temporary feedback)
    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and resolve the initial topic.
    ///
    /// Precedence for the starting topic: explicit `initial_topic` (the
    /// `--topic` flag), then the persisted session, then the catalog's
    /// first entry. Unknown ids at any step fall back to the first entry.
    pub fn new(
        catalog: Catalog,
        catalog_path: Option<PathBuf>,
        clipboard: Box<dyn ClipboardSink>,
        session: Option<SessionStore>,
        initial_topic: Option<&str>,
        theme: Theme,
    ) -> Self {
        let requested = initial_topic
            .map(str::to_string)
            .or_else(|| session.as_ref().and_then(SessionStore::load))
            .unwrap_or_default();

        let mut app = Self {
            running: true,
            theme,
            sidebar_open: false,
            focus: Focus::Sidebar,
            show_help: false,
            catalog,
            catalog_path,
            session,
            clipboard,
            active_topic_id: String::new(),
            segments: Vec::new(),
            sidebar_index: 0,
            scroll: 0,
            code_cursor: 0,
            copied: None,
            filter_text: String::new(),
            filter_active: false,
            status_message: None,
        };
        app.apply_topic(&requested);
        app
    }

    /// The currently active topic.
    pub fn active_topic(&self) -> &Topic {
        self.catalog.resolve(&self.active_topic_id)
    }

    /// Id of the active topic.
    pub fn active_topic_id(&self) -> &str {
        &self.active_topic_id
    }

    /// Segments of the active topic, in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The full catalog, for the sidebar.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Activate a topic by id and close the sidebar overlay.
    ///
    /// Unknown ids resolve to the catalog's first topic. The change is
    /// reflected into the session store so it survives a restart.
    pub fn select_topic(&mut self, id: &str) {
        self.apply_topic(id);
        self.close_sidebar();
    }

    /// Resolve and apply a topic id without touching the sidebar.
    fn apply_topic(&mut self, id: &str) {
        let (topic_id, segments) = {
            let topic = self.catalog.resolve(id);
            (topic.id.clone(), segment(&topic.content))
        };
        if topic_id != id {
            tracing::debug!(requested = id, resolved = %topic_id, "topic id not in catalog, using fallback");
        }
        self.active_topic_id = topic_id;
        self.segments = segments;
        let index = self
            .filtered_topics()
            .iter()
            .position(|(_, t)| t.id == self.active_topic_id)
            .unwrap_or(0);
        self.sidebar_index = index;
        self.scroll = 0;
        self.code_cursor = 0;
        self.persist_active();
    }

    /// Write the active topic id to the session store, best effort.
    fn persist_active(&self) {
        if let Some(session) = &self.session {
            if let Err(e) = session.store(&self.active_topic_id) {
                tracing::debug!(error = %e, "failed to persist active topic");
            }
        }
    }

    /// Flip between the dark and light themes.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Open the sidebar overlay.
    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
        self.focus = Focus::Sidebar;
    }

    /// Close the sidebar overlay. A no-op when already closed.
    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Toggle the sidebar overlay.
    pub fn toggle_sidebar(&mut self) {
        if self.sidebar_open {
            self.close_sidebar();
        } else {
            self.open_sidebar();
        }
    }

    /// Move keyboard focus to the other pane.
    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // ----- sidebar navigation -------------------------------------------

    /// Topics matching the current filter, with their catalog positions.
    pub fn filtered_topics(&self) -> Vec<(usize, &Topic)> {
        self.catalog
            .topics()
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches_filter(&t.title))
            .collect()
    }

    /// Check a title against the current filter.
    pub fn matches_filter(&self, title: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        title.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Move the sidebar cursor down by n entries.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.filtered_topics().len().saturating_sub(1);
        self.sidebar_index = (self.sidebar_index + n).min(max);
    }

    /// Move the sidebar cursor up by n entries.
    pub fn select_prev_n(&mut self, n: usize) {
        self.sidebar_index = self.sidebar_index.saturating_sub(n);
    }

    /// Jump the sidebar cursor to the first entry.
    pub fn select_first(&mut self) {
        self.sidebar_index = 0;
    }

    /// Jump the sidebar cursor to the last entry.
    pub fn select_last(&mut self) {
        let max = self.filtered_topics().len().saturating_sub(1);
        self.sidebar_index = max;
    }

    /// Activate the topic under the sidebar cursor.
    pub fn activate_selected(&mut self) {
        let id = self
            .filtered_topics()
            .get(self.sidebar_index)
            .map(|(_, t)| t.id.clone());
        if let Some(id) = id {
            self.select_topic(&id);
        }
    }

    // ----- content navigation -------------------------------------------

    /// Code blocks of the active topic: ordinal and trimmed body.
    pub fn code_blocks(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Code { content, .. } => Some(content.as_str()),
                Segment::Text { .. } => None,
            })
            .collect()
    }

    /// Body of the code block under the copy cursor.
    pub fn selected_code(&self) -> Option<&str> {
        self.code_blocks().get(self.code_cursor).copied()
    }

    /// Move the copy cursor to the next code block.
    pub fn next_code_block(&mut self) {
        let max = self.code_blocks().len().saturating_sub(1);
        self.code_cursor = (self.code_cursor + 1).min(max);
    }

    /// Move the copy cursor to the previous code block.
    pub fn prev_code_block(&mut self) {
        self.code_cursor = self.code_cursor.saturating_sub(1);
    }

    /// Scroll the content pane down. Clamped during rendering.
    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n);
    }

    /// Scroll the content pane up.
    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    /// Scroll the content pane to the top.
    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    /// Scroll the content pane to the bottom. Clamped during rendering.
    pub fn scroll_bottom(&mut self) {
        self.scroll = u16::MAX;
    }

    // ----- copy indicator -----------------------------------------------

    /// Copy the selected code block to the clipboard.
    ///
    /// On success the block's key starts the 1600 ms "copied" indicator.
    /// On failure the state is left unchanged and the error goes to the
    /// diagnostic sink only.
    pub fn request_copy(&mut self) {
        self.request_copy_at(Instant::now());
    }

    fn request_copy_at(&mut self, now: Instant) {
        let Some(text) = self.selected_code().map(str::to_string) else {
            return;
        };
        let key = copy_key(&self.active_topic_id, self.code_cursor);
        match self.clipboard.copy_text(&text) {
            Ok(()) => {
                self.copied = Some((key, now));
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "clipboard write failed");
            }
        }
    }

    /// The key whose "copied" indicator is currently showing.
    pub fn copied_key(&self) -> Option<&str> {
        let (key, since) = self.copied.as_ref()?;
        (since.elapsed() < COPY_FEEDBACK).then_some(key.as_str())
    }

    /// Advance time-driven state.
    ///
    /// Clears the copied indicator once its key has been showing for the
    /// full feedback window. A newer copy replaces key and instant
    /// together, so a stale deadline can never clear a newer key.
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, since)) = &self.copied {
            if now.duration_since(*since) >= COPY_FEEDBACK {
                self.copied = None;
            }
        }
        if let Some((_, since)) = &self.status_message {
            if now.duration_since(*since) >= STATUS_MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }

    // ----- filter -------------------------------------------------------

    /// Enter filter input mode, revealing the sidebar if hidden.
    pub fn start_filter(&mut self) {
        self.filter_active = true;
        self.open_sidebar();
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit input mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.sidebar_index = 0;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.sidebar_index = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.sidebar_index = 0;
    }

    // ----- status / lifecycle -------------------------------------------

    /// Set a temporary status message.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// The current status message if it hasn't expired.
    pub fn status_message(&self) -> Option<&str> {
        let (msg, since) = self.status_message.as_ref()?;
        (since.elapsed() < STATUS_MESSAGE_TTL).then_some(msg.as_str())
    }

    /// Re-read a file-backed catalog from disk.
    ///
    /// The active topic is kept when it still exists, otherwise the viewer
    /// falls back to the first topic. Built-in catalogs have nothing to
    /// reload.
    pub fn reload(&mut self) {
        let Some(path) = self.catalog_path.clone() else {
            self.set_status_message("Built-in catalog, nothing to reload".to_string());
            return;
        };
        match Catalog::load(&path) {
            Ok(catalog) => {
                self.catalog = catalog;
                let id = self.active_topic_id.clone();
                self.apply_topic(&id);
                self.set_status_message(format!("Reloaded {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "catalog reload failed");
                self.set_status_message(format!("Reload failed: {e:#}"));
            }
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::mock::{FailingClipboard, RecordingClipboard};
    use tempfile::tempdir;

    fn topic(id: &str, title: &str, content: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::from_topics(vec![
            topic(
                "select",
                "SELECT Basics",
                "Intro.\n```sql\nSELECT 1;\n```\nMore.\n```sql\nSELECT 2;\n```",
            ),
            topic("joins", "JOINs", "All about joins.\n```sql\nSELECT * FROM a JOIN b;\n```"),
            topic("theory", "Relational Theory", "No code here at all."),
        ])
        .unwrap()
    }

    fn test_app() -> App {
        App::new(
            test_catalog(),
            None,
            Box::new(RecordingClipboard::default()),
            None,
            None,
            Theme::dark(),
        )
    }

    fn app_with_clipboard(clipboard: Box<dyn ClipboardSink>) -> App {
        App::new(test_catalog(), None, clipboard, None, None, Theme::dark())
    }

    #[test]
    fn test_starts_on_first_topic_by_default() {
        let app = test_app();
        assert_eq!(app.active_topic_id(), "select");
        assert_eq!(app.segments().len(), 4);
    }

    #[test]
    fn test_initial_topic_flag_wins_over_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("last-topic"));
        store.store("theory").unwrap();

        let app = App::new(
            test_catalog(),
            None,
            Box::new(RecordingClipboard::default()),
            Some(store),
            Some("joins"),
            Theme::dark(),
        );
        assert_eq!(app.active_topic_id(), "joins");
    }

    #[test]
    fn test_initial_topic_restored_from_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("last-topic"));
        store.store("theory").unwrap();

        let app = App::new(
            test_catalog(),
            None,
            Box::new(RecordingClipboard::default()),
            Some(store),
            None,
            Theme::dark(),
        );
        assert_eq!(app.active_topic_id(), "theory");
    }

    #[test]
    fn test_unknown_initial_topic_falls_back_to_first() {
        let app = App::new(
            test_catalog(),
            None,
            Box::new(RecordingClipboard::default()),
            None,
            Some("no-such-topic"),
            Theme::dark(),
        );
        assert_eq!(app.active_topic_id(), "select");
    }

    #[test]
    fn test_select_topic_recomputes_segments_and_resets_cursors() {
        let mut app = test_app();
        app.scroll = 7;
        app.code_cursor = 1;
        app.open_sidebar();

        app.select_topic("joins");
        assert_eq!(app.active_topic_id(), "joins");
        assert_eq!(app.segments().len(), 2);
        assert_eq!(app.scroll, 0);
        assert_eq!(app.code_cursor, 0);
        assert!(!app.sidebar_open);
    }

    #[test]
    fn test_select_unknown_topic_falls_back_to_first() {
        let mut app = test_app();
        app.select_topic("joins");
        app.select_topic("missing");
        assert_eq!(app.active_topic_id(), "select");
    }

    #[test]
    fn test_select_topic_persists_to_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last-topic");
        let mut app = App::new(
            test_catalog(),
            None,
            Box::new(RecordingClipboard::default()),
            Some(SessionStore::new(&path)),
            None,
            Theme::dark(),
        );

        app.select_topic("joins");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "joins");
    }

    #[test]
    fn test_theme_double_toggle_restores_mode() {
        let mut app = test_app();
        let before = app.theme.mode;
        app.toggle_theme();
        assert_ne!(app.theme.mode, before);
        app.toggle_theme();
        assert_eq!(app.theme.mode, before);
    }

    #[test]
    fn test_close_sidebar_when_closed_is_noop() {
        let mut app = test_app();
        assert!(!app.sidebar_open);
        app.close_sidebar();
        assert!(!app.sidebar_open);
        app.open_sidebar();
        assert!(app.sidebar_open);
    }

    #[test]
    fn test_request_copy_writes_exact_text_and_sets_key() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with_clipboard(Box::new(clipboard.clone()));

        app.request_copy();
        assert_eq!(clipboard.copied(), vec!["SELECT 1;".to_string()]);
        assert_eq!(app.copied_key(), Some("select-code-0"));
    }

    #[test]
    fn test_copy_failure_leaves_state_unchanged() {
        let mut app = app_with_clipboard(Box::new(FailingClipboard));
        app.request_copy();
        assert_eq!(app.copied_key(), None);
    }

    #[test]
    fn test_copy_indicator_expires_after_feedback_window() {
        let mut app = test_app();
        let t0 = Instant::now();
        app.request_copy_at(t0);
        assert!(app.copied_key().is_some());

        // Just before the deadline the key survives the tick.
        app.tick(t0 + COPY_FEEDBACK - Duration::from_millis(1));
        assert!(app.copied_key().is_some());

        app.tick(t0 + COPY_FEEDBACK);
        assert_eq!(app.copied_key(), None);
    }

    #[test]
    fn test_newer_copy_survives_older_deadline() {
        let mut app = test_app();
        let t0 = Instant::now();

        app.request_copy_at(t0);
        app.next_code_block();
        app.request_copy_at(t0 + Duration::from_millis(100));

        // The first copy's deadline passes; the second key must survive.
        app.tick(t0 + COPY_FEEDBACK + Duration::from_millis(50));
        let (key, _) = app.copied.as_ref().unwrap();
        assert_eq!(key, "select-code-1");

        // The second copy's own deadline clears it.
        app.tick(t0 + Duration::from_millis(100) + COPY_FEEDBACK);
        assert!(app.copied.is_none());
    }

    #[test]
    fn test_copy_keys_are_topic_qualified() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with_clipboard(Box::new(clipboard.clone()));

        app.request_copy();
        let first_key = app.copied.as_ref().unwrap().0.clone();

        app.select_topic("joins");
        app.request_copy();
        let second_key = app.copied.as_ref().unwrap().0.clone();

        assert_eq!(first_key, "select-code-0");
        assert_eq!(second_key, "joins-code-0");
        assert_ne!(first_key, second_key);
    }

    #[test]
    fn test_copy_with_no_code_blocks_is_noop() {
        let clipboard = RecordingClipboard::default();
        let mut app = app_with_clipboard(Box::new(clipboard.clone()));
        app.select_topic("theory");
        app.request_copy();
        assert!(clipboard.copied().is_empty());
        assert_eq!(app.copied_key(), None);
    }

    #[test]
    fn test_code_cursor_clamps_to_block_count() {
        let mut app = test_app();
        assert_eq!(app.code_blocks().len(), 2);
        app.next_code_block();
        app.next_code_block();
        app.next_code_block();
        assert_eq!(app.code_cursor, 1);
        app.prev_code_block();
        app.prev_code_block();
        assert_eq!(app.code_cursor, 0);
    }

    #[test]
    fn test_filter_narrows_sidebar_and_activation_respects_it() {
        let mut app = test_app();
        app.start_filter();
        for c in "join".chars() {
            app.filter_push(c);
        }
        let filtered = app.filtered_topics();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].1.id, "joins");

        app.cancel_filter();
        app.activate_selected();
        assert_eq!(app.active_topic_id(), "joins");
    }

    #[test]
    fn test_sidebar_navigation_clamps() {
        let mut app = test_app();
        app.select_next_n(10);
        assert_eq!(app.sidebar_index, 2);
        app.select_prev_n(10);
        assert_eq!(app.sidebar_index, 0);
        app.select_last();
        assert_eq!(app.sidebar_index, 2);
        app.select_first();
        assert_eq!(app.sidebar_index, 0);
    }

    #[test]
    fn test_reload_without_file_backing_sets_status() {
        let mut app = test_app();
        app.reload();
        assert!(app.status_message().is_some());
        assert_eq!(app.active_topic_id(), "select");
    }

    #[test]
    fn test_reload_from_file_keeps_active_topic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topics.json");
        let topics = vec![
            topic("a", "A", "first"),
            topic("b", "B", "second"),
        ];
        std::fs::write(&path, serde_json::to_string(&topics).unwrap()).unwrap();

        let mut app = App::new(
            Catalog::load(&path).unwrap(),
            Some(path.clone()),
            Box::new(RecordingClipboard::default()),
            None,
            Some("b"),
            Theme::dark(),
        );
        assert_eq!(app.active_topic_id(), "b");

        app.reload();
        assert_eq!(app.active_topic_id(), "b");

        // Drop "b" from the file; reload falls back to the first topic.
        std::fs::write(&path, serde_json::to_string(&topics[..1]).unwrap()).unwrap();
        app.reload();
        assert_eq!(app.active_topic_id(), "a");
    }
}
