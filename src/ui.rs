//! UI rendering helpers for the terminal user interface.
//!
//! `layout` splits the terminal into fixed areas once per frame; the same
//! `Screen` is used to draw and to route mouse input, so a click always lands
//! on what was drawn.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::{AudioBackend, PlaybackState};
use crate::config::UiSettings;
use crate::viewport::Geometry;


/// Clickable transport buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Open,
    Prev,
    Play,
    Pause,
    Stop,
    Next,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Open,
        Control::Prev,
        Control::Play,
        Control::Pause,
        Control::Stop,
        Control::Next,
    ];

    fn label(self) -> &'static str {
        match self {
            Control::Open => "open",
            Control::Prev => "|<<",
            Control::Play => "play",
            Control::Pause => "pause",
            Control::Stop => "stop",
            Control::Next => ">>|",
        }
    }
}

/// Screen areas for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub header: Rect,
    pub status: Rect,
    pub list: Rect,
    pub controls: Vec<(Control, Rect)>,
    pub help: Rect,
}

impl Screen {
    /// Rows inside the list border.
    pub fn list_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.list)
    }

    /// Viewport geometry for the list: one terminal cell per row.
    pub fn list_geometry(&self) -> Geometry {
        let inner = self.list_inner();
        Geometry {
            row_height: 1.0,
            top: f32::from(inner.y),
            bottom: f32::from(inner.y) + f32::from(inner.height),
            left: f32::from(inner.x),
            row_width: f32::from(inner.width),
        }
    }

    /// Button under a terminal cell, if any.
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, rect)| point_in_rect(column, row, *rect))
            .map(|(control, _)| *control)
    }
}

pub fn layout(area: Rect) -> Screen {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Control::ALL.map(|_| Constraint::Ratio(1, Control::ALL.len() as u32)))
        .split(chunks[3]);

    Screen {
        header: chunks[0],
        status: chunks[1],
        list: chunks[2],
        controls: Control::ALL.into_iter().zip(buttons.iter().copied()).collect(),
        help: chunks[4],
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

fn controls_text() -> String {
    [
        ("o", "open folder/file"),
        ("enter", "play"),
        ("space/p", "pause"),
        ("s", "stop"),
        ("h/l", "prev/next"),
        ("j/k", "scroll"),
        ("q", "quit"),
    ]
    .iter()
    .map(|(k, v)| format!("[{k}] {v}"))
    .collect::<Vec<String>>()
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn now_playing_text<B: AudioBackend>(app: &App<B>) -> String {
    let name = app
        .session()
        .current_track()
        .map(|t| t.display_name())
        .unwrap_or_else(|| "-".to_string());
    match app.playback() {
        PlaybackState::Playing => format!("Playing: {name} [{}]", format_mmss(app.elapsed())),
        PlaybackState::Paused => format!("Paused: {name} [{}]", format_mmss(app.elapsed())),
        PlaybackState::Stopped => format!("Stopped: {name}"),
    }
}

/// Render the entire UI. `prompt` is the path prompt input while it is open.
pub fn draw<B: AudioBackend>(
    frame: &mut Frame,
    app: &App<B>,
    screen: &Screen,
    prompt: Option<&str>,
    ui_settings: &UiSettings,
) {
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tonearm ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, screen.header);

    draw_status(frame, app, screen.status);
    draw_list(frame, app, screen);

    for (control, rect) in &screen.controls {
        let active = matches!(
            (control, app.playback()),
            (Control::Play, PlaybackState::Playing) | (Control::Pause, PlaybackState::Paused)
        );
        let mut button = Paragraph::new(control.label())
            .alignment(Alignment::Center)
            .block(Block::bordered());
        if active {
            button = button.bold();
        }
        frame.render_widget(button, *rect);
    }

    frame.render_widget(Paragraph::new(controls_text()).dim(), screen.help);

    if let Some(input) = prompt {
        let area = centered_rect_sized(64, 3, screen.list);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(format!("{input}_")).block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" open folder or file (enter loads, esc cancels) "),
        );
        frame.render_widget(popup, area);
    }
}

fn draw_status<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let mut lines = vec![Line::from(now_playing_text(app))];
    if let Some(msg) = app.status_message() {
        let line = Line::from(msg.text.as_str());
        lines.push(if msg.is_error { line.red() } else { line });
    }

    let status = Paragraph::new(lines)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn draw_list<B: AudioBackend>(frame: &mut Frame, app: &App<B>, screen: &Screen) {
    let count = app.playlist().len();
    let title = match app.folders().last() {
        _ if count == 0 => " tracks (press o to open a folder or file) ".to_string(),
        Some(dir) => format!(" tracks ({count}) - {} ", dir.display()),
        None => format!(" tracks ({count}) "),
    };
    frame.render_widget(
        Block::default().borders(Borders::ALL).title(title),
        screen.list,
    );

    let inner = screen.list_inner();
    let viewport = app.viewport();
    let current = app.current_index();
    let hovered = app.hovered_index();

    // Rows come from the viewport so drawing and hit testing agree.
    for (index, y) in viewport.visible_rows() {
        if y < f32::from(inner.y) {
            continue;
        }
        let Some(track) = app.playlist().get(index) else {
            break;
        };

        let mut style = Style::default();
        if current == Some(index) {
            style = style.add_modifier(Modifier::BOLD);
            if app.is_playing() {
                style = style.fg(Color::Green);
            }
        }
        if hovered == Some(index) {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let marker = if current == Some(index) { "> " } else { "  " };
        let row = Rect {
            x: inner.x,
            y: y as u16,
            width: inner.width,
            height: 1,
        };
        let text = format!("{marker}{}. {}", index + 1, track.display_name());
        frame.render_widget(Paragraph::new(text).style(style), row);
    }
}
