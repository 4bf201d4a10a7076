//! In-memory backend for exercising the playback session without a device.

use std::collections::HashSet;

use crate::library::TrackRef;

use super::backend::{AudioBackend, BackendError};
use super::types::PlaybackState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(TrackRef),
    Play,
    Pause,
    Stop,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub unplayable: HashSet<TrackRef>,
    pub finished: bool,
    status: PlaybackState,
    loaded: Option<TrackRef>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `open` fail for this locator.
    pub fn refuse(mut self, path: &str) -> Self {
        self.unplayable.insert(TrackRef::new(path));
        self
    }

    pub fn status(&self) -> PlaybackState {
        self.status
    }

    pub fn loaded(&self) -> Option<&TrackRef> {
        self.loaded.as_ref()
    }

    pub fn opens(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Open(_)))
            .count()
    }
}

impl AudioBackend for FakeBackend {
    fn open(&mut self, track: &TrackRef) -> Result<(), BackendError> {
        self.calls.push(Call::Open(track.clone()));
        if self.unplayable.contains(track) {
            return Err(BackendError::Open {
                locator: track.clone(),
                reason: "No such file or directory".to_string(),
            });
        }
        self.loaded = Some(track.clone());
        self.status = PlaybackState::Paused;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.loaded.is_some() {
            self.status = PlaybackState::Playing;
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        if self.status == PlaybackState::Playing {
            self.status = PlaybackState::Paused;
        }
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.loaded = None;
        self.status = PlaybackState::Stopped;
    }

    fn take_finished(&mut self) -> bool {
        let finished = std::mem::take(&mut self.finished);
        if finished {
            self.status = PlaybackState::Stopped;
        }
        finished
    }
}
