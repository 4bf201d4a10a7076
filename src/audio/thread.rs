use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use super::backend::BackendError;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

fn publish(playback_info: &PlaybackHandle, update: impl FnOnce(&mut PlaybackInfo)) {
    if let Ok(mut info) = playback_info.lock() {
        update(&mut info);
    }
}

/// Spawn the thread that owns the output stream and the current sink.
///
/// `ready` receives exactly one message: whether the output device opened.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    ready: Sender<Result<(), BackendError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(BackendError::Device(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut generation = 0u64;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load {
                        source,
                        generation: loaded,
                    } => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        let new_sink = Sink::connect_new(stream.mixer());
                        new_sink.append(*source);
                        new_sink.pause();
                        sink = Some(new_sink);
                        generation = loaded;

                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        publish(&playback_info, |info| *info = PlaybackInfo::default());
                    }

                    AudioCmd::Play => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                paused = false;
                                started_at = Some(Instant::now());
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                if let Some(st) = started_at.take() {
                                    accumulated += st.elapsed();
                                }
                                paused = true;
                                publish(&playback_info, |info| info.elapsed = accumulated);
                            }
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        publish(&playback_info, |info| *info = PlaybackInfo::default());
                    }

                    AudioCmd::Quit => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // Natural end of track, otherwise refresh the elapsed time.
            if let Some(ref s) = sink {
                if !paused && s.empty() {
                    if let Some(st) = started_at.take() {
                        accumulated += st.elapsed();
                    }
                    paused = true;
                    publish(&playback_info, |info| {
                        info.finished.mark(generation);
                        info.elapsed = accumulated;
                    });
                } else if let Some(st) = started_at {
                    let elapsed = accumulated + st.elapsed();
                    publish(&playback_info, |info| info.elapsed = elapsed);
                }
            }
        }
    })
}
