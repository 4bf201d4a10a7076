//! Audio-related small types and handles.
//!
//! This module defines the transport status, the commands understood by the
//! audio thread and the playback info it publishes.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::source::TrackSource;

/// Transport status of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub enum AudioCmd {
    /// Replace the current sink with a paused one holding this source.
    /// `generation` tags the end-of-track notice for this load.
    Load {
        source: Box<TrackSource>,
        generation: u64,
    },
    /// Start or resume the loaded source.
    Play,
    /// Suspend the loaded source, keeping its position.
    Pause,
    /// Drop the loaded source.
    Stop,
    /// Stop and leave the audio thread.
    Quit,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Elapsed playback time for the loaded track.
    pub elapsed: Duration,
    /// Set when the loaded track ran out on its own.
    pub finished: FinishLatch,
}

/// End-of-track notice, tagged with the load it belongs to so a notice from a
/// replaced track is never applied to its successor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinishLatch(Option<u64>);

impl FinishLatch {
    pub fn mark(&mut self, generation: u64) {
        self.0 = Some(generation);
    }

    /// Consume the notice. Returns `true` only if it belongs to `generation`.
    pub fn take_for(&mut self, generation: u64) -> bool {
        self.0.take() == Some(generation)
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
