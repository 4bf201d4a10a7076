//! Playlist repository: folder scanning and the deduplicated playlist.
//!
//! `scan` discovers audio files directly inside a folder and
//! `track_from_file` accepts a single one; `Playlist` keeps them in discovery
//! order and drops locators it has already seen.

mod model;
mod playlist;
mod scan;

pub use model::*;
pub use playlist::Playlist;
pub use scan::{scan, track_from_file};

#[cfg(test)]
mod tests;
