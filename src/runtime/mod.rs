use std::env;
use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::session::SessionOptions;

mod cli;
mod event_loop;
mod logging;
mod prompt;
mod settings;

use cli::{Cli, USAGE};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse(env::args().skip(1)).map_err(|e| format!("{e}\n{USAGE}"))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let (settings, config_warning) = settings::load_settings();
    if cli.print_config {
        let mut stdout = io::stdout();
        write!(stdout, "{}", settings.to_toml()?)?;
        return Ok(());
    }

    if let Some(path) = logging::init(&settings.logging) {
        log::info!("tonearm starting, logging to {}", path.display());
    }
    if let Some(warning) = config_warning {
        eprintln!("tonearm: {warning}");
        log::warn!("{warning}");
    }

    let backend = RodioBackend::new()?;
    let mut app = App::new(
        backend,
        SessionOptions::from(&settings.playback),
        settings.library.clone(),
    );
    for path in &cli.paths {
        // A bad path is reported in the status line; the others still load.
        let _ = app.open_path(path);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    log::info!("tonearm exiting");
    run_result
}
