//! The session model: playlist, current index and transport status.

use std::path::Path;
use std::time::Duration;

use crate::audio::{AudioBackend, BackendError, PlaybackState};
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::library::{self, LibraryError, Playlist, TrackRef};

use super::error::TransportError;

/// Behavior fixed when the session is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Play the first track after a load that added tracks.
    pub autoplay_on_load: bool,
    /// Treat a track running out like `next()`; otherwise just stop.
    pub advance_on_finish: bool,
}

impl From<&PlaybackSettings> for SessionOptions {
    fn from(s: &PlaybackSettings) -> Self {
        Self {
            autoplay_on_load: s.autoplay_on_load,
            advance_on_finish: s.advance_on_finish,
        }
    }
}

/// Result of a successful folder load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Tracks that were not already in the playlist.
    pub added: usize,
    /// Outcome of the autoplay attempt, when one was made.
    pub autoplay: Option<Result<(), TransportError>>,
}

fn failure_reason(err: BackendError) -> String {
    match err {
        BackendError::Open { reason, .. } | BackendError::Decode { reason, .. } => reason,
        other => other.to_string(),
    }
}

pub struct PlaybackSession<B: AudioBackend> {
    backend: B,
    playlist: Playlist,
    current: Option<usize>,
    status: PlaybackState,
    options: SessionOptions,
}

impl<B: AudioBackend> PlaybackSession<B> {
    /// Create an empty, stopped session.
    pub fn new(backend: B, options: SessionOptions) -> Self {
        Self {
            backend,
            playlist: Playlist::new(),
            current: None,
            status: PlaybackState::Stopped,
            options,
        }
    }

    /// Scan `dir` and append its tracks to the playlist.
    ///
    /// On failure the playlist and transport are left exactly as they were.
    pub fn load_folder(
        &mut self,
        dir: &Path,
        settings: &LibrarySettings,
    ) -> Result<LoadReport, LibraryError> {
        let found = library::scan(dir, settings)?;
        let report = self.append_tracks(found);
        log::info!(
            "loaded {}: {} new tracks ({} total)",
            dir.display(),
            report.added,
            self.playlist.len()
        );
        Ok(report)
    }

    /// Append already-discovered tracks, skipping known locators.
    ///
    /// When anything was added the current index goes back to 0 and, with
    /// `autoplay_on_load`, the first track is started.
    pub fn append_tracks<I>(&mut self, tracks: I) -> LoadReport
    where
        I: IntoIterator<Item = TrackRef>,
    {
        let added = self.playlist.extend_unique(tracks);
        if added == 0 {
            return LoadReport {
                added,
                autoplay: None,
            };
        }

        if self.options.autoplay_on_load {
            return LoadReport {
                added,
                autoplay: Some(self.set_track(0)),
            };
        }

        // The loaded resource must always belong to the current index.
        if self.current != Some(0) && self.status != PlaybackState::Stopped {
            self.stop();
        }
        self.current = Some(0);
        LoadReport {
            added,
            autoplay: None,
        }
    }

    /// Append a single audio file.
    ///
    /// Unlike a folder load this leaves the transport alone; only the first
    /// track of an empty playlist becomes current.
    pub fn add_file(
        &mut self,
        path: &Path,
        settings: &LibrarySettings,
    ) -> Result<bool, LibraryError> {
        let track = library::track_from_file(path, settings)?;
        let added = self.playlist.push_unique(track);
        if added && self.current.is_none() {
            self.current = Some(0);
        }
        log::info!(
            "add {}: {} ({} total)",
            path.display(),
            if added { "added" } else { "already listed" },
            self.playlist.len()
        );
        Ok(added)
    }

    /// Start (Stopped), resume (Paused) or keep (Playing) playback.
    pub fn play(&mut self) -> Result<(), TransportError> {
        match self.status {
            PlaybackState::Playing => Ok(()),
            PlaybackState::Paused => {
                self.backend.play();
                self.status = PlaybackState::Playing;
                Ok(())
            }
            PlaybackState::Stopped => {
                if self.playlist.is_empty() {
                    return Err(TransportError::EmptyPlaylist);
                }
                let track = self
                    .current
                    .and_then(|i| self.playlist.get(i))
                    .cloned()
                    .ok_or(TransportError::EmptyPlaylist)?;

                if let Err(e) = self.backend.open(&track) {
                    self.status = PlaybackState::Stopped;
                    let reason = failure_reason(e);
                    log::warn!("cannot play {track}: {reason}");
                    return Err(TransportError::TrackUnplayable {
                        locator: track,
                        reason,
                    });
                }

                self.backend.play();
                self.status = PlaybackState::Playing;
                log::info!("playing {track}");
                Ok(())
            }
        }
    }

    /// Toggle between Playing and Paused. Does nothing while Stopped.
    pub fn pause(&mut self) {
        match self.status {
            PlaybackState::Playing => {
                self.backend.pause();
                self.status = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.backend.play();
                self.status = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {}
        }
    }

    /// Release the loaded resource. The position is not kept.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.status = PlaybackState::Stopped;
    }

    pub fn next(&mut self) -> Result<(), TransportError> {
        match self.current {
            Some(i) if i + 1 < self.playlist.len() => self.switch_to(i + 1),
            _ => Err(TransportError::EndOfPlaylist),
        }
    }

    pub fn previous(&mut self) -> Result<(), TransportError> {
        match self.current {
            Some(i) if i > 0 => self.switch_to(i - 1),
            _ => Err(TransportError::StartOfPlaylist),
        }
    }

    /// Stop and play the track at `index`.
    pub fn set_track(&mut self, index: usize) -> Result<(), TransportError> {
        if index >= self.playlist.len() {
            return Err(TransportError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            });
        }
        self.switch_to(index)
    }

    fn switch_to(&mut self, index: usize) -> Result<(), TransportError> {
        self.stop();
        self.current = Some(index);
        self.play()
    }

    /// Handle the current track running out on its own.
    pub fn on_playback_finished(&mut self) -> Result<(), TransportError> {
        if !self.options.advance_on_finish {
            self.stop();
            return Ok(());
        }
        self.next().inspect_err(|e| {
            if e.is_boundary() {
                self.stop();
            }
        })
    }

    /// Forward a natural end of track reported by the backend, if any.
    pub fn poll_backend(&mut self) -> Option<Result<(), TransportError>> {
        if !self.backend.take_finished() || self.status != PlaybackState::Playing {
            return None;
        }
        Some(self.on_playback_finished())
    }

    pub fn playlist(&self) -> &[TrackRef] {
        self.playlist.tracks()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&TrackRef> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn status(&self) -> PlaybackState {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        if self.status == PlaybackState::Stopped {
            Duration::ZERO
        } else {
            self.backend.elapsed()
        }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
