use std::env;
use std::path::PathBuf;

/// Single-line path prompt opened with `o`; takes a folder or an audio file.
#[derive(Debug, Default, Clone)]
pub struct PathPrompt {
    input: String,
}

impl PathPrompt {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Consume the prompt. Blank input means the user picked nothing.
    pub fn submit(self) -> Option<PathBuf> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(expand_home(raw, env::var_os("HOME").map(PathBuf::from)))
    }
}

fn expand_home(raw: &str, home: Option<PathBuf>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home,
        (r, Some(home)) if r.starts_with("~/") => home.join(&r[2..]),
        (r, _) => PathBuf::from(r),
    }
}
