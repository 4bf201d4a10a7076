//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model`; it drives the playback session and
//! keeps the list viewport following the current track.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
