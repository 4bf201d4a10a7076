use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::library::TrackRef;

use super::backend::{AudioBackend, BackendError};
use super::source::open_source;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// `rodio` output driven from a dedicated audio thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Option<JoinHandle<()>>,
    /// Bumped on every `open`; matches the `Load` sent to the thread.
    generation: u64,
}

impl RodioBackend {
    /// Open the default output device. Fails when no device is available.
    pub fn new() -> Result<Self, BackendError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_audio_thread(rx, playback_info.clone(), ready_tx);
        ready_rx.recv().map_err(|_| BackendError::Disconnected)??;

        Ok(Self {
            tx,
            playback: playback_info,
            join: Some(join),
            generation: 0,
        })
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            log::warn!("audio thread is gone; command dropped");
        }
    }
}

impl AudioBackend for RodioBackend {
    fn open(&mut self, track: &TrackRef) -> Result<(), BackendError> {
        let source = open_source(track)?;
        self.generation = self.generation.wrapping_add(1);
        self.tx
            .send(AudioCmd::Load {
                source: Box::new(source),
                generation: self.generation,
            })
            .map_err(|_| BackendError::Disconnected)?;
        Ok(())
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }

    fn elapsed(&self) -> Duration {
        self.playback
            .lock()
            .map(|info| info.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    fn take_finished(&mut self) -> bool {
        match self.playback.lock() {
            Ok(mut info) => info.finished.take_for(self.generation),
            Err(_) => false,
        }
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
