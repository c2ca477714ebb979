//! Clipboard boundary.
//!
//! The viewer only ever writes to the clipboard; the outcome is reduced to
//! success or failure. The trait seam keeps the state controller testable
//! without touching the OS clipboard.

use anyhow::Result;
use std::fmt::Debug;

/// Write-only clipboard abstraction.
pub trait ClipboardSink: Send + Debug {
    /// Place `text` on the clipboard exactly as given.
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
///
/// A fresh handle is opened per write; arboard talks to NSPasteboard on
/// macOS and X11/Wayland on Linux.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
