//! Playlist storage: track order plus a set that keeps locators unique.

use std::collections::HashSet;

use super::model::TrackRef;

/// Ordered, duplicate-free list of track references.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<TrackRef>,
    seen: HashSet<TrackRef>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` unless an equal locator is already present.
    ///
    /// Returns `true` when the track was added.
    pub fn push_unique(&mut self, track: TrackRef) -> bool {
        if self.seen.contains(&track) {
            return false;
        }
        self.seen.insert(track.clone());
        self.tracks.push(track);
        true
    }

    /// Append every track in order, skipping duplicates. Returns the number added.
    pub fn extend_unique<I>(&mut self, tracks: I) -> usize
    where
        I: IntoIterator<Item = TrackRef>,
    {
        let mut added = 0;
        for track in tracks {
            if self.push_unique(track) {
                added += 1;
            }
        }
        added
    }

    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&TrackRef> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
