//! Persisted viewer session.
//!
//! The only state that survives a restart is the active topic id, written
//! to a small state file on every topic change and read back at startup.
//! This is the terminal counterpart of a URL fragment: best effort, never
//! fatal, and trivially inspectable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores the last active topic id in a state file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default state-file location under the platform state directory.
    ///
    /// Returns None on platforms with no resolvable state or local-data
    /// directory, in which case the session is simply not persisted.
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("querydocs").join("last-topic"))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved topic id, if any.
    pub fn load(&self) -> Option<String> {
        let id = fs::read_to_string(&self.path).ok()?;
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    /// Save the active topic id, creating parent directories as needed.
    pub fn store(&self, id: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, id)
    }
}
