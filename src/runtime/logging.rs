use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Env, Target};

use crate::config::{self, LoggingSettings};

/// Route `log` output to a file so it never draws over the terminal UI.
///
/// Returns the log path in use, or `None` when no file could be opened; in
/// that case logging stays disabled.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(config::default_log_path)?;
    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("tonearm: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .ok()?;
    Some(path)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("tonearm").join("tonearm.log");

        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn open_log_file_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tonearm.log");
        writeln!(open_log_file(&path).unwrap(), "one").unwrap();
        writeln!(open_log_file(&path).unwrap(), "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
