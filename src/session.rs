//! Playback session: the transport state machine over the playlist.
//!
//! The session owns the playlist, the current-track index and the audio
//! backend. Track changes are compositions of `stop` and `play`, so a failed
//! open always leaves the session `Stopped` at the requested index.

mod error;
mod model;

pub use error::TransportError;
pub use model::*;
