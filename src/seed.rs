//! Fixed sample dataset written into a freshly created catalog.
//!
//! Every timestamp is an offset from a single `now` supplied by the caller,
//! so relative ordering between rows is the same on every run.

use crate::db::{insert_liked_song, insert_playlist, insert_playlist_entry, insert_song, Database};
use crate::errors::CatalogError;
use crate::models::{LikedSong, Playlist, PlaylistEntry, Song, TableCounts};
use log::{debug, info};

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

// (id, name, artist, album, albumArt, uri, duration ms)
const SONGS: [(&str, &str, &str, &str, &str, &str, i64); 5] = [
    (
        "1",
        "Bohemian Rhapsody",
        "Queen",
        "A Night at the Opera",
        "https://example.com/queen_bohemian.jpg",
        "spotify:track:6l8GvAyoUZwWDgF1e4822w",
        354000,
    ),
    (
        "2",
        "Billie Jean",
        "Michael Jackson",
        "Thriller",
        "https://example.com/mj_thriller.jpg",
        "spotify:track:5ChkMS8OtdzJeqyybCc9R5",
        294000,
    ),
    (
        "3",
        "Hotel California",
        "Eagles",
        "Hotel California",
        "https://example.com/eagles_hotel.jpg",
        "spotify:track:40riOy7x9W7GXjyGp4pjAv",
        391000,
    ),
    (
        "4",
        "Sweet Child O' Mine",
        "Guns N' Roses",
        "Appetite for Destruction",
        "https://example.com/gnr_appetite.jpg",
        "spotify:track:7o2CTH4ctstm8TNelqjb51",
        356000,
    ),
    (
        "5",
        "Imagine",
        "John Lennon",
        "Imagine",
        "https://example.com/lennon_imagine.jpg",
        "spotify:track:7pKfPomDEeI4TPT6EOYjn9",
        183000,
    ),
];

// (name, seconds before now)
const PLAYLISTS: [(&str, i64); 3] = [
    ("My Favorites", DAY),
    ("Rock Classics", DAY / 2),
    ("Chill Vibes", 0),
];

// (index into PLAYLISTS, song id, seconds before now)
const PLAYLIST_ENTRIES: [(usize, &str, i64); 8] = [
    (0, "1", 3600),
    (0, "3", 3000),
    (0, "5", 2400),
    (1, "1", 1800),
    (1, "3", 1200),
    (1, "4", 600),
    (2, "2", 300),
    (2, "5", 0),
];

// (song id, seconds before now)
const LIKED_SONGS: [(&str, i64); 3] = [("1", 7200), ("2", 5400), ("5", 1800)];

pub fn sample_songs() -> Vec<Song> {
    SONGS
        .iter()
        .map(|&(id, name, artist, album, album_art, uri, duration)| Song {
            id: id.to_string(),
            name: name.to_string(),
            artist: Some(artist.to_string()),
            album: Some(album.to_string()),
            album_art: Some(album_art.to_string()),
            uri: Some(uri.to_string()),
            duration: Some(duration),
        })
        .collect()
}

pub fn sample_playlists(now: i64) -> Vec<Playlist> {
    PLAYLISTS
        .iter()
        .map(|&(name, ago)| Playlist {
            id: 0,
            name: name.to_string(),
            created_at: now - ago,
        })
        .collect()
}

/// Entries resolved against the ids the engine gave the sample playlists,
/// in `PLAYLISTS` order.
pub fn sample_playlist_entries(now: i64, playlist_ids: &[i64]) -> Vec<PlaylistEntry> {
    PLAYLIST_ENTRIES
        .iter()
        .map(|&(index, song_id, ago)| PlaylistEntry {
            id: 0,
            playlist_id: playlist_ids[index],
            song_id: song_id.to_string(),
            added_at: now - ago,
        })
        .collect()
}

pub fn sample_liked_songs(now: i64) -> Vec<LikedSong> {
    LIKED_SONGS
        .iter()
        .map(|&(song_id, ago)| LikedSong {
            id: 0,
            song_id: song_id.to_string(),
            added_at: now - ago,
        })
        .collect()
}

/// Inserts the sample dataset in one transaction and returns what was written.
///
/// Songs and playlists go in before the rows that reference them. Playlist ids
/// are whatever the engine assigns; entries are resolved through them.
pub fn seed_sample_data(db: &mut Database, now: i64) -> Result<TableCounts, CatalogError> {
    info!("Inserting sample data...");
    let tx = db.transaction()?;
    let mut counts = TableCounts::default();

    for song in sample_songs() {
        insert_song(&tx, &song)?;
        counts.songs += 1;
    }

    let mut playlist_ids = Vec::with_capacity(PLAYLISTS.len());
    for playlist in sample_playlists(now) {
        let id = insert_playlist(&tx, &playlist)?;
        debug!("Playlist '{}' assigned id {}", playlist.name, id);
        playlist_ids.push(id);
        counts.playlists += 1;
    }

    for entry in sample_playlist_entries(now, &playlist_ids) {
        insert_playlist_entry(&tx, &entry)?;
        counts.playlist_songs += 1;
    }

    for liked in sample_liked_songs(now) {
        insert_liked_song(&tx, &liked)?;
        counts.liked_songs += 1;
    }

    tx.commit()?;
    info!(
        "Sample data inserted: {} songs, {} playlists, {} playlist entries, {} liked songs",
        counts.songs, counts.playlists, counts.playlist_songs, counts.liked_songs
    );
    Ok(counts)
}
