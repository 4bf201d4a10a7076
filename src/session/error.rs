use thiserror::Error;

use crate::library::TrackRef;

/// Outcome of a transport command that did not start or change playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("playlist is empty")]
    EmptyPlaylist,
    #[error("cannot play {locator}: {reason}")]
    TrackUnplayable { locator: TrackRef, reason: String },
    #[error("end of playlist")]
    EndOfPlaylist,
    #[error("start of playlist")]
    StartOfPlaylist,
    #[error("no track {index} (playlist has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TransportError {
    /// Boundary conditions are informational: nothing went wrong, nothing changed.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::EndOfPlaylist | Self::StartOfPlaylist)
    }
}
