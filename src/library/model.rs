use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Locator of a playable audio resource.
///
/// Two references are equal when their paths are equal; nothing about the
/// file itself is inspected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackRef {
    path: PathBuf,
}

impl TrackRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in the track list, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("directory unavailable: {path}: {reason}")]
    DirectoryUnavailable { path: PathBuf, reason: String },
    #[error("file unavailable: {path}: {reason}")]
    FileUnavailable { path: PathBuf, reason: String },
    #[error("not a supported audio file: {path}")]
    UnsupportedFile { path: PathBuf },
}
