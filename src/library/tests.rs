use super::{Playlist, TrackRef};

fn r(path: &str) -> TrackRef {
    TrackRef::new(path)
}

#[test]
fn push_unique_keeps_insertion_order_and_drops_duplicates() {
    let mut playlist = Playlist::new();
    assert!(playlist.push_unique(r("/music/b.mp3")));
    assert!(playlist.push_unique(r("/music/a.wav")));
    assert!(!playlist.push_unique(r("/music/a.wav")));

    assert_eq!(playlist.tracks(), &[r("/music/b.mp3"), r("/music/a.wav")]);
}

#[test]
fn extend_unique_counts_only_new_entries_across_batches() {
    let mut playlist = Playlist::new();
    let first = playlist.extend_unique(vec![r("/a/1.mp3"), r("/a/2.mp3")]);
    let second = playlist.extend_unique(vec![r("/a/2.mp3"), r("/b/1.mp3"), r("/b/1.mp3")]);

    assert_eq!(first, 2);
    assert_eq!(second, 1);
    assert_eq!(
        playlist.tracks(),
        &[r("/a/1.mp3"), r("/a/2.mp3"), r("/b/1.mp3")]
    );
}

#[test]
fn equality_is_by_locator_value_only() {
    let mut playlist = Playlist::new();
    playlist.push_unique(r("/music/Song.mp3"));
    // Different case is a different locator.
    assert!(playlist.push_unique(r("/music/song.mp3")));
    assert_eq!(playlist.len(), 2);
}

#[test]
fn display_name_is_the_file_name() {
    assert_eq!(r("/music/01 Intro.flac").display_name(), "01 Intro.flac");
    assert_eq!(r("/").display_name(), "/");
}
