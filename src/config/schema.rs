use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tonearm/config.toml` or `~/.config/tonearm/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TONEARM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, leading dot optional).
    pub extensions: Vec<String>,
    /// Whether symlinked files inside a folder are followed.
    pub follow_links: bool,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "flac".into()],
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing the first track as soon as a folder load adds tracks.
    pub autoplay_on_load: bool,
    /// Move to the next track when the current one finishes on its own.
    pub advance_on_finish: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay_on_load: true,
            advance_on_finish: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Rows scrolled per mouse-wheel notch.
    pub scroll_step: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ drop the needle ~ ".to_string(),
            scroll_step: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/tonearm/tonearm.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
