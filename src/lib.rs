//! # querydocs
//!
//! A terminal viewer for a fixed catalog of SQL-tutorial topics.
//!
//! The viewer renders one topic at a time as alternating prose and fenced
//! code blocks, with a sidebar navigator, a dark/light theme toggle, and a
//! copy-to-clipboard affordance for code blocks. The active topic id is
//! the only state persisted across runs.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐   ┌─────────┐ │
//! │  │  app    │───▶│ content  │───▶│   ui    │──▶│ Terminal│ │
//! │  │ (state) │    │(segments)│    │(render) │   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘   └─────────┘ │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  ┌───────────┐  ┌─────────┐                                │
//! │  │ clipboard │  │ session │                                │
//! │  │  (sink)   │  │ (store) │                                │
//! │  └───────────┘  └─────────┘                                │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: View state and every user-triggered transition: topic
//!   selection, theme toggle, sidebar visibility, the transient copied
//!   indicator
//! - **[`content`]**: The topic catalog and the segmenter that splits raw
//!   topic text into prose and fenced-code segments
//! - **[`clipboard`]**: Write-only clipboard boundary ([`ClipboardSink`]
//!   trait) with the arboard-backed system implementation
//! - **[`session`]**: Persists the active topic id across runs
//! - **[`ui`]**: Terminal rendering using ratatui: sidebar, content pane,
//!   header/status chrome, and theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Browse the built-in tutorial
//! querydocs
//!
//! # Open a specific topic from a custom catalog
//! querydocs --catalog topics.json --topic joins
//!
//! # Inspect a topic's parsed structure
//! querydocs --dump joins
//! ```
//!
//! ### As a library
//!
//! ```
//! use querydocs::content::{segment, Segment};
//!
//! let segments = segment("Intro\n```sql\nSELECT 1;\n```");
//! assert_eq!(segments.len(), 2);
//! assert!(matches!(segments[1], Segment::Code { .. }));
//! ```

pub mod app;
pub mod clipboard;
pub mod content;
pub mod events;
pub mod logging;
pub mod session;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Focus};
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use content::{segment, Catalog, Language, Segment, Topic};
pub use session::SessionStore;
pub use ui::{Theme, ThemeMode};
