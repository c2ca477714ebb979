//! Terminal UI rendering using ratatui.
//!
//! The viewer is a two-pane layout: a sidebar listing topic titles and a
//! content pane rendering the active topic's segments. On narrow terminals
//! the sidebar becomes an overlay, mirroring the mobile affordance of a
//! documentation site.
//!
//! ## Submodules
//!
//! - [`sidebar`]: Topic navigator with incremental title filtering
//! - [`content`]: Segment rendering (prose paragraphs and code blocks)
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! The main loop in `main.rs` owns the frame layout and calls the `render`
//! functions here.

pub mod common;
pub mod content;
pub mod sidebar;
pub mod theme;

pub use theme::{Theme, ThemeMode};

/// Column width of the sidebar pane.
pub const SIDEBAR_WIDTH: u16 = 32;

/// Below this terminal width the sidebar renders as an overlay instead of
/// a persistent pane.
pub const NARROW_BREAKPOINT: u16 = 80;
