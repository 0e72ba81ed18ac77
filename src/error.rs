//! Listing error types
//!
//! - **`ListError`** - Per-argument and per-entry failures. These are
//!   reported to stderr and raise the exit status, but never stop the run.
//!
//! Version-control failures never show up here; the `vcs` module downgrades
//! them to "no information" on its own.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recoverable failures while listing.
///
/// Display produces the message printed after the program name:
///
/// ```text
/// statls: missing.txt: No such file or directory
/// ```
#[derive(Debug)]
pub enum ListError {
    /// stat or directory enumeration failed
    Io {
        path: PathBuf,
        source: Arc<io::Error>,
    },
    /// A trailing slash was given on something that can't be listed
    NotADirectory { path: PathBuf },
}

impl ListError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::shared_io(path, Arc::new(source))
    }

    /// An I/O failure whose error is also kept elsewhere, e.g. on a
    /// degraded [`FileRecord`](crate::metadata::FileRecord)
    pub fn shared_io(path: impl Into<PathBuf>, source: Arc<io::Error>) -> Self {
        ListError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ListError::Io { path, .. } | ListError::NotADirectory { path } => path,
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Io { source, .. } => Some(&**source),
            ListError::NotADirectory { .. } => None,
        }
    }
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), describe_io(source))
            }
            ListError::NotADirectory { path } => {
                write!(f, "{}: Not a directory", path.display())
            }
        }
    }
}

/// The OS message without the trailing `(os error N)`.
fn describe_io(error: &io::Error) -> String {
    let message = error.to_string();
    match error.raw_os_error() {
        Some(code) => message
            .strip_suffix(&format!(" (os error {code})"))
            .map(str::to_string)
            .unwrap_or(message),
        None => message,
    }
}
