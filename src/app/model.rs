//! Application model: `App` composes the playback session with the list
//! viewport and keeps the last outcome for the status line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{AudioBackend, PlaybackState};
use crate::config::LibrarySettings;
use crate::library::{LibraryError, TrackRef};
use crate::session::{PlaybackSession, SessionOptions, TransportError};
use crate::viewport::{Geometry, ListViewport, Point};

/// Last reported outcome, shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The main application model.
pub struct App<B: AudioBackend> {
    session: PlaybackSession<B>,
    viewport: ListViewport,
    library: LibrarySettings,
    folders: Vec<PathBuf>,
    status: Option<StatusMessage>,
}

impl<B: AudioBackend> App<B> {
    pub fn new(backend: B, options: SessionOptions, library: LibrarySettings) -> Self {
        Self {
            session: PlaybackSession::new(backend, options),
            viewport: ListViewport::default(),
            library,
            folders: Vec::new(),
            status: None,
        }
    }

    pub fn session(&self) -> &PlaybackSession<B> {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut PlaybackSession<B> {
        &mut self.session
    }

    pub fn viewport(&self) -> &ListViewport {
        &self.viewport
    }

    /// Folders that contributed tracks, in load order.
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn playlist(&self) -> &[TrackRef] {
        self.session.playlist()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn playback(&self) -> PlaybackState {
        self.session.status()
    }

    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    /// Append the tracks of `dir`. Returns the number of new tracks.
    pub fn load_folder(&mut self, dir: &Path) -> Result<usize, LibraryError> {
        let report = match self.session.load_folder(dir, &self.library) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("{e}");
                self.status = Some(StatusMessage::error(e.to_string()));
                return Err(e);
            }
        };

        if report.added > 0 {
            self.folders.push(dir.to_path_buf());
        }
        self.viewport.set_len(self.session.playlist().len());
        self.follow_current();

        self.status = Some(match report.autoplay {
            Some(Err(e)) => StatusMessage::error(e.to_string()),
            _ => StatusMessage::info(format!(
                "Added {} tracks from {}",
                report.added,
                dir.display()
            )),
        });
        Ok(report.added)
    }

    /// Append one audio file. Returns whether it was new.
    pub fn add_file(&mut self, path: &Path) -> Result<bool, LibraryError> {
        let added = match self.session.add_file(path, &self.library) {
            Ok(added) => added,
            Err(e) => {
                log::warn!("{e}");
                self.status = Some(StatusMessage::error(e.to_string()));
                return Err(e);
            }
        };

        self.viewport.set_len(self.session.playlist().len());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.status = Some(StatusMessage::info(if added {
            format!("Added {name}")
        } else {
            format!("{name} is already in the playlist")
        }));
        Ok(added)
    }

    /// Add whatever `path` names: a single file, otherwise a folder.
    /// Returns the number of new tracks.
    pub fn open_path(&mut self, path: &Path) -> Result<usize, LibraryError> {
        if path.is_file() {
            self.add_file(path).map(usize::from)
        } else {
            self.load_folder(path)
        }
    }

    pub fn play(&mut self) -> Result<(), TransportError> {
        let result = self.session.play();
        self.report(&result);
        result
    }

    pub fn pause(&mut self) {
        self.session.pause();
        self.report(&Ok(()));
    }

    pub fn stop(&mut self) {
        self.session.stop();
        self.report(&Ok(()));
    }

    pub fn next(&mut self) -> Result<(), TransportError> {
        let result = self.session.next();
        self.report(&result);
        result
    }

    pub fn previous(&mut self) -> Result<(), TransportError> {
        let result = self.session.previous();
        self.report(&result);
        result
    }

    pub fn set_track(&mut self, index: usize) -> Result<(), TransportError> {
        let result = self.session.set_track(index);
        self.report(&result);
        result
    }

    /// Forward backend events; call once per frame.
    pub fn tick(&mut self) {
        if let Some(result) = self.session.poll_backend() {
            self.report(&result);
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.viewport.scroll_by(delta);
    }

    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.viewport.hit_test(point)
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.viewport.hovered_index()
    }

    pub fn pointer_moved(&mut self, point: Point) {
        self.viewport.hover(point);
    }

    /// Click-to-select: play the row under `point`, if any.
    pub fn pointer_pressed(&mut self, point: Point) -> Option<Result<(), TransportError>> {
        let index = self.hit_test(point)?;
        Some(self.set_track(index))
    }

    /// The list area moved or changed size.
    pub fn resize(&mut self, geometry: Geometry) {
        if self.viewport.geometry() != geometry {
            self.viewport.set_geometry(geometry);
        }
    }

    fn follow_current(&mut self) {
        if let Some(i) = self.session.current_index() {
            self.viewport.ensure_visible(i);
        }
    }

    fn report(&mut self, result: &Result<(), TransportError>) {
        self.follow_current();
        self.status = Some(match result {
            Ok(()) => StatusMessage::info(self.describe_transport()),
            Err(e) if e.is_boundary() => {
                log::debug!("{e}");
                StatusMessage::info(capitalize(&e.to_string()))
            }
            Err(e) => {
                log::warn!("{e}");
                StatusMessage::error(e.to_string())
            }
        });
    }

    fn describe_transport(&self) -> String {
        let name = self
            .session
            .current_track()
            .map(TrackRef::display_name)
            .unwrap_or_default();
        match self.session.status() {
            PlaybackState::Playing => format!("Playing {name}"),
            PlaybackState::Paused => format!("Paused {name}"),
            PlaybackState::Stopped => "Stopped".to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
