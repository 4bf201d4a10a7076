use std::time::Duration;

use thiserror::Error;

use crate::library::TrackRef;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("cannot open {locator}: {reason}")]
    Open { locator: TrackRef, reason: String },
    #[error("cannot decode {locator}: {reason}")]
    Decode { locator: TrackRef, reason: String },
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("audio thread is gone")]
    Disconnected,
}

/// What the playback session needs from an audio output.
///
/// `open` is the only fallible call; it loads a track paused. The other
/// transport calls act on whatever is loaded and never block.
pub trait AudioBackend {
    fn open(&mut self, track: &TrackRef) -> Result<(), BackendError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);

    /// Time played of the loaded track.
    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }

    /// Returns `true` once after the loaded track ran out on its own.
    fn take_finished(&mut self) -> bool {
        false
    }
}
