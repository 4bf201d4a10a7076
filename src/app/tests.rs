use std::fs;

use tempfile::tempdir;

use super::*;
use crate::audio::PlaybackState;
use crate::audio::testing::FakeBackend;
use crate::config::LibrarySettings;
use crate::library::{LibraryError, TrackRef};
use crate::session::{SessionOptions, TransportError};
use crate::viewport::{Geometry, Point};

fn options(autoplay: bool) -> SessionOptions {
    SessionOptions {
        autoplay_on_load: autoplay,
        advance_on_finish: false,
    }
}

/// One-cell rows in a five-row band at y=2, as in a terminal.
fn geometry() -> Geometry {
    Geometry {
        row_height: 1.0,
        top: 2.0,
        bottom: 7.0,
        left: 1.0,
        row_width: 40.0,
    }
}

fn folder_with(names: &[&str]) -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    dir
}

fn app_with_tracks(count: usize) -> (App<FakeBackend>, tempfile::TempDir) {
    let names: Vec<String> = (0..count).map(|i| format!("{i:02}.mp3")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let dir = folder_with(&refs);

    let mut app = App::new(FakeBackend::new(), options(false), LibrarySettings::default());
    app.resize(geometry());
    app.load_folder(dir.path()).unwrap();
    (app, dir)
}

#[test]
fn loading_a_folder_filters_and_autoplays_first_track() {
    let dir = folder_with(&["b.mp3", "a.wav", "c.txt"]);
    let mut app = App::new(FakeBackend::new(), options(true), LibrarySettings::default());

    assert_eq!(app.load_folder(dir.path()).unwrap(), 2);
    let names: Vec<String> = app.playlist().iter().map(TrackRef::display_name).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"b.mp3".to_string()));
    assert!(names.contains(&"a.wav".to_string()));
    assert_eq!(app.current_index(), Some(0));
    assert!(app.is_playing());

    // Loading the same folder again adds nothing and is not listed twice.
    assert_eq!(app.load_folder(dir.path()).unwrap(), 0);
    assert_eq!(app.playlist().len(), 2);
    assert_eq!(app.folders().len(), 1);
}

#[test]
fn folder_without_audio_is_not_recorded() {
    let (mut app, dir) = app_with_tracks(2);
    let notes = folder_with(&["readme.txt", "cover.jpg"]);

    assert_eq!(app.load_folder(notes.path()).unwrap(), 0);
    assert_eq!(app.folders().len(), 1);
    assert_eq!(app.folders()[0], dir.path());
}

#[test]
fn loading_two_folders_appends() {
    let first = folder_with(&["1.mp3", "2.mp3"]);
    let second = folder_with(&["3.ogg"]);
    let mut app = App::new(FakeBackend::new(), options(false), LibrarySettings::default());

    app.load_folder(first.path()).unwrap();
    app.load_folder(second.path()).unwrap();
    assert_eq!(app.playlist().len(), 3);
    assert_eq!(app.playlist()[2].display_name(), "3.ogg");
    assert_eq!(app.viewport().len(), 3);
}

#[test]
fn failed_load_reports_and_keeps_state() {
    let (mut app, dir) = app_with_tracks(3);
    app.set_track(1).unwrap();

    assert!(app.load_folder(&dir.path().join("missing")).is_err());
    assert_eq!(app.playlist().len(), 3);
    assert_eq!(app.current_index(), Some(1));
    assert!(app.is_playing());
    assert!(app.status_message().unwrap().is_error);
    assert_eq!(app.folders().len(), 1);
}

#[test]
fn autoplay_failure_is_reported_but_load_succeeds() {
    let dir = folder_with(&["only.mp3"]);
    let only = TrackRef::new(dir.path().canonicalize().unwrap().join("only.mp3"));
    let mut backend = FakeBackend::new();
    backend.unplayable.insert(only);
    let mut app = App::new(backend, options(true), LibrarySettings::default());

    assert_eq!(app.load_folder(dir.path()).unwrap(), 1);
    assert_eq!(app.playback(), PlaybackState::Stopped);
    let status = app.status_message().unwrap();
    assert!(status.is_error);
    assert!(status.text.contains("only.mp3"));
}

#[test]
fn next_keeps_current_row_visible() {
    let (mut app, _dir) = app_with_tracks(12);
    app.play().unwrap();
    for _ in 0..8 {
        app.next().unwrap();
    }
    assert_eq!(app.current_index(), Some(8));

    let v = app.viewport();
    let y = v.row_y(8);
    assert!(y >= geometry().top && y + 1.0 <= geometry().bottom);
    assert_eq!(v.offset(), 4.0);
}

#[test]
fn previous_after_scrolling_away_brings_row_back() {
    let (mut app, _dir) = app_with_tracks(12);
    app.set_track(3).unwrap();
    app.scroll_by(7.0);

    app.previous().unwrap();
    assert_eq!(app.current_index(), Some(2));
    assert_eq!(app.viewport().offset(), 2.0);
}

#[test]
fn click_on_a_row_selects_and_plays_it() {
    let (mut app, _dir) = app_with_tracks(12);
    app.scroll_by(3.0);

    // Terminal row 4 is list row 4 - 2 + 3 = 5.
    let result = app.pointer_pressed(Point::new(5.0, 4.0));
    assert_eq!(result, Some(Ok(())));
    assert_eq!(app.current_index(), Some(5));
    assert!(app.is_playing());
}

#[test]
fn click_outside_the_list_does_nothing() {
    let (mut app, _dir) = app_with_tracks(3);
    assert_eq!(app.pointer_pressed(Point::new(5.0, 0.0)), None);
    assert_eq!(app.pointer_pressed(Point::new(5.0, 6.0)), None);
    assert_eq!(app.pointer_pressed(Point::new(0.0, 3.0)), None);
    assert_eq!(app.playback(), PlaybackState::Stopped);
}

#[test]
fn hover_and_hit_test_share_rows() {
    let (mut app, _dir) = app_with_tracks(12);
    app.scroll_by(2.0);

    let p = Point::new(10.0, 3.0);
    app.pointer_moved(p);
    assert_eq!(app.hovered_index(), Some(3));
    assert_eq!(app.hit_test(p), app.hovered_index());
}

#[test]
fn boundary_outcomes_are_informational() {
    let (mut app, _dir) = app_with_tracks(2);
    app.play().unwrap();

    assert_eq!(app.previous(), Err(TransportError::StartOfPlaylist));
    let status = app.status_message().unwrap();
    assert!(!status.is_error);
    assert_eq!(status.text, "Start of playlist");
    assert!(app.is_playing());
}

#[test]
fn transport_messages_follow_state() {
    let (mut app, _dir) = app_with_tracks(2);
    let first = app.playlist()[0].display_name();
    app.play().unwrap();
    assert_eq!(app.status_message().unwrap().text, format!("Playing {first}"));
    app.pause();
    assert_eq!(app.status_message().unwrap().text, format!("Paused {first}"));
    app.stop();
    assert_eq!(app.status_message().unwrap().text, "Stopped");
}

#[test]
fn tick_forwards_natural_end_of_track() {
    let (mut app, _dir) = app_with_tracks(2);
    app.play().unwrap();
    app.session_mut().backend_mut().finished = true;

    app.tick();
    assert_eq!(app.playback(), PlaybackState::Stopped);
}

#[test]
fn resize_reclamps_offset() {
    let (mut app, _dir) = app_with_tracks(12);
    app.scroll_by(7.0);
    app.resize(Geometry {
        bottom: 12.0,
        ..geometry()
    });
    assert_eq!(app.viewport().offset(), 2.0);
}

#[test]
fn add_file_appends_a_single_track() {
    let (mut app, dir) = app_with_tracks(3);
    app.set_track(1).unwrap();
    let extra = dir.path().join("extra").with_extension("ogg");
    fs::create_dir_all(dir.path().join("elsewhere")).unwrap();
    let loose = dir.path().join("elsewhere").join("loose.ogg");
    fs::write(&loose, b"x").unwrap();

    assert!(app.add_file(&loose).unwrap());
    assert_eq!(app.playlist().len(), 4);
    assert_eq!(app.playlist()[3].display_name(), "loose.ogg");
    assert_eq!(app.viewport().len(), 4);
    assert_eq!(app.current_index(), Some(1));
    assert!(app.is_playing());
    assert_eq!(app.status_message().unwrap().text, "Added loose.ogg");
    assert_eq!(app.folders().len(), 1);

    assert!(!app.add_file(&loose).unwrap());
    assert_eq!(app.playlist().len(), 4);
    assert!(!app.status_message().unwrap().is_error);

    assert!(app.add_file(&extra).is_err());
    assert!(app.status_message().unwrap().is_error);
}

#[test]
fn add_file_rejects_non_audio_files() {
    let dir = folder_with(&["readme.txt"]);
    let mut app = App::new(FakeBackend::new(), options(true), LibrarySettings::default());

    let err = app.add_file(&dir.path().join("readme.txt")).unwrap_err();
    assert!(matches!(err, LibraryError::UnsupportedFile { .. }));
    assert!(app.playlist().is_empty());
    let status = app.status_message().unwrap();
    assert!(status.is_error);
    assert!(status.text.contains("readme.txt"));
}

#[test]
fn open_path_handles_files_and_folders() {
    let dir = folder_with(&["1.mp3", "2.mp3"]);
    let single = folder_with(&["solo.wav"]);
    let mut app = App::new(FakeBackend::new(), options(false), LibrarySettings::default());

    assert_eq!(app.open_path(dir.path()).unwrap(), 2);
    assert_eq!(app.open_path(&single.path().join("solo.wav")).unwrap(), 1);
    assert_eq!(app.open_path(&single.path().join("solo.wav")).unwrap(), 0);
    assert_eq!(app.playlist().len(), 3);
    assert_eq!(app.folders().len(), 1);

    assert!(matches!(
        app.open_path(&dir.path().join("missing")),
        Err(LibraryError::DirectoryUnavailable { .. })
    ));
}

#[test]
fn hover_follows_the_list_when_next_scrolls_it() {
    let (mut app, _dir) = app_with_tracks(12);
    let pointer = Point::new(10.0, 3.0);
    app.pointer_moved(pointer);
    assert_eq!(app.hovered_index(), Some(1));

    app.play().unwrap();
    for _ in 0..8 {
        app.next().unwrap();
    }
    // The list scrolled by four rows under the still pointer.
    assert_eq!(app.viewport().offset(), 4.0);
    assert_eq!(app.hovered_index(), Some(5));
    assert_eq!(app.hovered_index(), app.hit_test(pointer));

    app.scroll_by(-4.0);
    assert_eq!(app.hovered_index(), Some(1));
}
