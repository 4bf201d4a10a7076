use std::path::PathBuf;

pub const USAGE: &str = "\
usage: tonearm [--print-config] [--help] [PATH...]

Each PATH is a folder, whose audio files are added in the order they are
found, or a single audio file. Press `o` inside the player to add more.";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cli {
    pub paths: Vec<PathBuf>,
    pub print_config: bool,
    pub help: bool,
}

impl Cli {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Cli::default();
        let mut only_paths = false;
        for arg in args {
            if only_paths {
                cli.paths.push(PathBuf::from(arg));
                continue;
            }
            match arg.as_str() {
                "-h" | "--help" => cli.help = true,
                "--print-config" => cli.print_config = true,
                "--" => only_paths = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown option: {flag}"));
                }
                _ => cli.paths.push(PathBuf::from(arg)),
            }
        }
        Ok(cli)
    }
}
