//! Opening and decoding track files for `rodio`.
//!
//! Decoding happens on the caller's thread so a missing or corrupt file is
//! reported before anything reaches the audio thread.

use std::fs::File;
use std::io::BufReader;

use rodio::Decoder;

use crate::library::TrackRef;

use super::backend::BackendError;

pub type TrackSource = Decoder<BufReader<File>>;

/// Open and decode `track`, returning a source ready to append to a sink.
pub(super) fn open_source(track: &TrackRef) -> Result<TrackSource, BackendError> {
    let file = File::open(track.path()).map_err(|e| BackendError::Open {
        locator: track.clone(),
        reason: e.to_string(),
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| BackendError::Decode {
        locator: track.clone(),
        reason: e.to_string(),
    })
}
