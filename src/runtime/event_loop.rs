use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::config;
use crate::runtime::prompt::PathPrompt;
use crate::ui::{self, Control, Screen};
use crate::viewport::Point;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Open path prompt, if any. Keys go to the prompt while it is open.
    pub prompt: Option<PathPrompt>,
    /// Areas of the last drawn frame, used to route mouse events.
    screen: Option<Screen>,
}

/// What the loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: forwards backend events, draws, and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let size = terminal.size()?;
        let screen = ui::layout(ratatui::layout::Rect::new(0, 0, size.width, size.height));
        app.resize(screen.list_geometry());
        app.tick();

        let prompt = state.prompt.as_ref().map(PathPrompt::input);
        terminal.draw(|f| ui::draw(f, app, &screen, prompt, &settings.ui))?;
        state.screen = Some(screen);

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        let flow = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key_event(key, app, state)
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, settings, app, state),
            _ => Flow::Continue,
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

pub fn handle_key_event<B: AudioBackend>(
    key: KeyEvent,
    app: &mut App<B>,
    state: &mut EventLoopState,
) -> Flow {
    if let Some(prompt) = state.prompt.as_mut() {
        match key.code {
            KeyCode::Esc => state.prompt = None,
            KeyCode::Backspace => prompt.pop(),
            KeyCode::Enter => {
                if let Some(path) = state.prompt.take().and_then(PathPrompt::submit) {
                    // Failures are kept as the status message.
                    let _ = app.open_path(&path);
                }
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.prompt = None;
            }
            KeyCode::Char(c) => prompt.push(c),
            _ => {}
        }
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Flow::Quit;
        }
        KeyCode::Char('o') => state.prompt = Some(PathPrompt::default()),
        KeyCode::Enter => {
            let _ = app.play();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => app.pause(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('l') | KeyCode::Char('n') => {
            let _ = app.next();
        }
        KeyCode::Char('h') | KeyCode::Char('b') => {
            let _ = app.previous();
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_by(1.0),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_by(-1.0),
        KeyCode::PageDown => app.scroll_by(page_height(app)),
        KeyCode::PageUp => app.scroll_by(-page_height(app)),
        _ => {}
    }
    Flow::Continue
}

pub fn handle_mouse_event<B: AudioBackend>(
    mouse: MouseEvent,
    settings: &config::Settings,
    app: &mut App<B>,
    state: &mut EventLoopState,
) -> Flow {
    if state.prompt.is_some() {
        return Flow::Continue;
    }
    let point = Point::new(f32::from(mouse.column), f32::from(mouse.row));
    let step = f32::from(settings.ui.scroll_step);

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(step),
        MouseEventKind::ScrollUp => app.scroll_by(-step),
        MouseEventKind::Moved => app.pointer_moved(point),
        MouseEventKind::Down(MouseButton::Left) => {
            let control = state
                .screen
                .as_ref()
                .and_then(|s| s.control_at(mouse.column, mouse.row));
            match control {
                Some(control) => press_control(control, app, state),
                None => {
                    let _ = app.pointer_pressed(point);
                }
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn press_control<B: AudioBackend>(control: Control, app: &mut App<B>, state: &mut EventLoopState) {
    match control {
        Control::Open => state.prompt = Some(PathPrompt::default()),
        Control::Prev => {
            let _ = app.previous();
        }
        Control::Play => {
            let _ = app.play();
        }
        Control::Pause => app.pause(),
        Control::Stop => app.stop(),
        Control::Next => {
            let _ = app.next();
        }
    }
}

fn page_height<B: AudioBackend>(app: &App<B>) -> f32 {
    app.viewport().geometry().height().max(1.0)
}
