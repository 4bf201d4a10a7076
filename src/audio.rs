//! Audio output behind the `AudioBackend` capability trait.
//!
//! `RodioBackend` keeps the output stream on its own thread and talks to it
//! over a channel; decoding happens on the caller's side so open failures are
//! reported synchronously.

mod backend;
mod player;
mod source;
mod thread;
mod types;

pub use backend::{AudioBackend, BackendError};
pub use player::RodioBackend;
pub use types::PlaybackState;

#[cfg(test)]
pub(crate) mod testing;
