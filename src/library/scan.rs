use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{LibraryError, TrackRef};

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the supported audio files directly inside `dir`, in the order the
/// filesystem returns them.
///
/// The folder is canonicalized first so every returned locator is absolute.
/// Fails only when the folder itself cannot be read; unreadable entries
/// inside it are skipped.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<TrackRef>, LibraryError> {
    let unavailable = |reason: String| LibraryError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason,
    };

    let root = dir.canonicalize().map_err(|e| unavailable(e.to_string()))?;
    if !root.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }

    let exts = normalized_extensions(settings);
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links);

    let mut tracks: Vec<TrackRef> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 is the folder itself: reading it failed.
            Err(e) if e.depth() == 0 => return Err(unavailable(e.to_string())),
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_audio_file(path, &exts) {
            tracks.push(TrackRef::new(path));
        }
    }

    log::debug!("scanned {}: {} audio files", root.display(), tracks.len());
    Ok(tracks)
}

/// Turn a single user-supplied file into a track, applying the same
/// extension filter as `scan`. The locator is canonicalized.
pub fn track_from_file(path: &Path, settings: &LibrarySettings) -> Result<TrackRef, LibraryError> {
    let file = path
        .canonicalize()
        .map_err(|e| LibraryError::FileUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    if !file.is_file() {
        return Err(LibraryError::FileUnavailable {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    if !is_audio_file(&file, &normalized_extensions(settings)) {
        return Err(LibraryError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }
    Ok(TrackRef::new(file))
}
