use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String, // Caller-supplied, referenced by the app
    pub name: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_art: Option<String>, // URI
    pub uri: Option<String>,       // Playable media URI
    pub duration: Option<i64>,     // Milliseconds
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: i64, // Auto-increment ID, 0 until inserted
    pub name: String,
    pub created_at: i64, // Unix timestamp
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: i64,
    pub playlist_id: i64,
    pub song_id: String,
    pub added_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikedSong {
    pub id: i64,
    pub song_id: String,
    pub added_at: i64,
}

/// Row count per table of the artifact.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: i64,
    pub playlists: i64,
    pub playlist_songs: i64,
    pub liked_songs: i64,
}
