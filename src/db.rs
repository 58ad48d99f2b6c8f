use crate::errors::CatalogError;
use crate::models::{LikedSong, Playlist, PlaylistEntry, Song, TableCounts};
use log::{debug, info};
use rusqlite::{params, Connection, Transaction};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// Referenced tables come first; SQLite resolves REFERENCES by name.
const DB_SCHEMA: &str = r#"
    CREATE TABLE songs (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        artist TEXT,
        album TEXT,
        albumArt TEXT,
        uri TEXT,
        duration INTEGER
    );

    CREATE TABLE playlists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        createdAt INTEGER NOT NULL
    );

    CREATE TABLE playlist_songs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        playlistId INTEGER NOT NULL,
        songId TEXT NOT NULL,
        addedAt INTEGER NOT NULL,
        FOREIGN KEY (playlistId) REFERENCES playlists (id) ON DELETE CASCADE,
        FOREIGN KEY (songId) REFERENCES songs (id) ON DELETE CASCADE,
        UNIQUE (playlistId, songId)
    );

    CREATE TABLE liked_songs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        songId TEXT NOT NULL,
        addedAt INTEGER NOT NULL,
        FOREIGN KEY (songId) REFERENCES songs (id) ON DELETE CASCADE,
        UNIQUE (songId)
    );
"#;

/// The four relations of the catalog, in creation order.
pub const CATALOG_TABLES: [&str; 4] = ["songs", "playlists", "playlist_songs", "liked_songs"];

/// Files SQLite may leave next to the database.
const SIDECAR_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Deletes whatever exists at `path` and creates an empty catalog schema there.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        remove_artifact(path)?;

        let mut db = Self::open(path)?;
        info!("Creating database schema at {}", path.display());

        // DDL is transactional in SQLite, so a failure leaves no tables behind.
        let tx = db.conn.transaction().map_err(CatalogError::Schema)?;
        tx.execute_batch(DB_SCHEMA).map_err(CatalogError::Schema)?;
        tx.commit().map_err(CatalogError::Schema)?;

        debug!("Created tables: {}", CATALOG_TABLES.join(", "));
        Ok(db)
    }

    /// Opens an existing artifact as-is.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let open_err = |source| CatalogError::ArtifactOpen {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(open_err)?;
        // Cascades are only enforced when the pragma is on for the session.
        conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(open_err)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn transaction(&mut self) -> Result<Transaction<'_>, CatalogError> {
        Ok(self.conn.transaction()?)
    }

    pub fn table_names(&self) -> Result<Vec<String>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name ASC",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, rusqlite::Error>>()?;
        Ok(names)
    }

    pub fn table_counts(&self) -> Result<TableCounts, CatalogError> {
        let count = |table: &str| -> Result<i64, rusqlite::Error> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        };

        Ok(TableCounts {
            songs: count("songs")?,
            playlists: count("playlists")?,
            playlist_songs: count("playlist_songs")?,
            liked_songs: count("liked_songs")?,
        })
    }

    /// Number of distinct playlists holding the given song.
    pub fn playlists_containing(&self, song_id: &str) -> Result<i64, CatalogError> {
        let count = self.conn.query_row(
            "SELECT COUNT(DISTINCT playlistId) FROM playlist_songs WHERE songId = ?1",
            params![song_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn get_song(&self, id: &str) -> Result<Option<Song>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, artist, album, albumArt, uri, duration FROM songs WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Song {
                id: row.get(0)?,
                name: row.get(1)?,
                artist: row.get(2)?,
                album: row.get(3)?,
                album_art: row.get(4)?,
                uri: row.get(5)?,
                duration: row.get(6)?,
            })
        })?;
        Ok(rows.next().transpose()?)
    }

    pub fn get_playlists(&self) -> Result<Vec<Playlist>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, createdAt FROM playlists ORDER BY id ASC")?;
        let playlists = stmt
            .query_map([], |row| {
                Ok(Playlist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;
        Ok(playlists)
    }

    pub fn get_liked_songs(&self) -> Result<Vec<LikedSong>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, songId, addedAt FROM liked_songs ORDER BY addedAt ASC")?;
        let liked = stmt
            .query_map([], |row| {
                Ok(LikedSong {
                    id: row.get(0)?,
                    song_id: row.get(1)?,
                    added_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;
        Ok(liked)
    }
}

pub fn insert_song(conn: &Connection, song: &Song) -> Result<(), CatalogError> {
    conn.execute(
        "INSERT INTO songs (id, name, artist, album, albumArt, uri, duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            song.id,
            song.name,
            song.artist,
            song.album,
            song.album_art,
            song.uri,
            song.duration
        ],
    )
    .map_err(|e| CatalogError::from_insert("songs", format!("id={} ({})", song.id, song.name), e))?;
    Ok(())
}

/// Inserts a playlist and returns the id the engine assigned to it.
pub fn insert_playlist(conn: &Connection, playlist: &Playlist) -> Result<i64, CatalogError> {
    conn.execute(
        "INSERT INTO playlists (name, createdAt) VALUES (?1, ?2)",
        params![playlist.name, playlist.created_at],
    )
    .map_err(|e| CatalogError::from_insert("playlists", format!("name={}", playlist.name), e))?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_playlist_entry(conn: &Connection, entry: &PlaylistEntry) -> Result<i64, CatalogError> {
    conn.execute(
        "INSERT INTO playlist_songs (playlistId, songId, addedAt) VALUES (?1, ?2, ?3)",
        params![entry.playlist_id, entry.song_id, entry.added_at],
    )
    .map_err(|e| {
        CatalogError::from_insert(
            "playlist_songs",
            format!("playlistId={} songId={}", entry.playlist_id, entry.song_id),
            e,
        )
    })?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_liked_song(conn: &Connection, liked: &LikedSong) -> Result<i64, CatalogError> {
    conn.execute(
        "INSERT INTO liked_songs (songId, addedAt) VALUES (?1, ?2)",
        params![liked.song_id, liked.added_at],
    )
    .map_err(|e| CatalogError::from_insert("liked_songs", format!("songId={}", liked.song_id), e))?;
    Ok(conn.last_insert_rowid())
}

fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Removes the artifact and any journal files. Missing files are fine.
fn remove_artifact(path: &Path) -> Result<(), CatalogError> {
    let candidates = std::iter::once(path.to_path_buf())
        .chain(SIDECAR_SUFFIXES.iter().map(|s| sidecar_path(path, s)));

    for candidate in candidates {
        match fs::remove_file(&candidate) {
            Ok(()) => info!("Removed previous artifact {}", candidate.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(CatalogError::ArtifactIo {
                    path: candidate,
                    source,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            name: format!("Song {}", id),
            artist: None,
            album: None,
            album_art: None,
            uri: None,
            duration: Some(1000),
        }
    }

    fn entry(playlist_id: i64, song_id: &str, added_at: i64) -> PlaylistEntry {
        PlaylistEntry {
            id: 0,
            playlist_id,
            song_id: song_id.to_string(),
            added_at,
        }
    }

    fn liked(song_id: &str, added_at: i64) -> LikedSong {
        LikedSong {
            id: 0,
            song_id: song_id.to_string(),
            added_at,
        }
    }

    fn new_playlist(name: &str) -> Playlist {
        Playlist {
            id: 0,
            name: name.to_string(),
            created_at: 100,
        }
    }

    #[test]
    fn creates_exactly_four_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();

        let mut expected: Vec<String> = CATALOG_TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(db.table_names().unwrap(), expected);
        assert_eq!(db.table_counts().unwrap(), TableCounts::default());
    }

    // (name, type, notnull, primary key)
    fn columns(db: &Database, table: &str) -> Vec<(String, String, bool, bool)> {
        let mut stmt = db
            .connection()
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        let cols = stmt
            .query_map([], |row| {
                Ok((row.get(1)?, row.get(2)?, row.get(3)?, row.get::<_, i64>(5)? > 0))
            })
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        cols
    }

    // (from column, referenced table, on_delete)
    fn foreign_keys(db: &Database, table: &str) -> Vec<(String, String, String)> {
        let mut stmt = db
            .connection()
            .prepare(&format!("PRAGMA foreign_key_list({})", table))
            .unwrap();
        let mut keys: Vec<(String, String, String)> = stmt
            .query_map([], |row| Ok((row.get(3)?, row.get(2)?, row.get(6)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        keys.sort();
        keys
    }

    fn col(name: &str, ty: &str, notnull: bool, pk: bool) -> (String, String, bool, bool) {
        (name.to_string(), ty.to_string(), notnull, pk)
    }

    fn fk(from: &str, table: &str) -> (String, String, String) {
        (from.to_string(), table.to_string(), "CASCADE".to_string())
    }

    #[test]
    fn columns_match_catalog_contract() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();

        assert_eq!(
            columns(&db, "songs"),
            vec![
                col("id", "TEXT", false, true),
                col("name", "TEXT", true, false),
                col("artist", "TEXT", false, false),
                col("album", "TEXT", false, false),
                col("albumArt", "TEXT", false, false),
                col("uri", "TEXT", false, false),
                col("duration", "INTEGER", false, false),
            ]
        );
        assert_eq!(
            columns(&db, "playlists"),
            vec![
                col("id", "INTEGER", false, true),
                col("name", "TEXT", true, false),
                col("createdAt", "INTEGER", true, false),
            ]
        );
        assert_eq!(
            columns(&db, "playlist_songs"),
            vec![
                col("id", "INTEGER", false, true),
                col("playlistId", "INTEGER", true, false),
                col("songId", "TEXT", true, false),
                col("addedAt", "INTEGER", true, false),
            ]
        );
        assert_eq!(
            columns(&db, "liked_songs"),
            vec![
                col("id", "INTEGER", false, true),
                col("songId", "TEXT", true, false),
                col("addedAt", "INTEGER", true, false),
            ]
        );
    }

    #[test]
    fn foreign_keys_cascade_on_delete() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();

        assert!(foreign_keys(&db, "songs").is_empty());
        assert!(foreign_keys(&db, "playlists").is_empty());
        assert_eq!(
            foreign_keys(&db, "playlist_songs"),
            vec![fk("playlistId", "playlists"), fk("songId", "songs")]
        );
        assert_eq!(foreign_keys(&db, "liked_songs"), vec![fk("songId", "songs")]);
    }

    #[test]
    fn create_discards_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.sqlite");
        {
            let db = Database::create(&path).unwrap();
            insert_song(db.connection(), &sample_song("1")).unwrap();
            assert_eq!(db.table_counts().unwrap().songs, 1);
        }
        fs::write(sidecar_path(&path, "-journal"), b"stale").unwrap();

        let db = Database::create(&path).unwrap();
        assert_eq!(db.table_counts().unwrap().songs, 0);
        assert_eq!(db.table_names().unwrap().len(), 4);
    }

    #[test]
    fn create_fails_when_parent_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::create(dir.path().join("missing").join("db.sqlite"));
        assert!(matches!(result, Err(CatalogError::ArtifactOpen { .. })));
    }

    #[test]
    fn create_fails_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::create(dir.path());
        assert!(matches!(result, Err(CatalogError::ArtifactIo { .. })));
    }

    #[test]
    fn playlist_ids_come_from_engine() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();

        let first = insert_playlist(db.connection(), &new_playlist("A")).unwrap();
        let second = insert_playlist(db.connection(), &new_playlist("B")).unwrap();
        assert!(second > first);

        let ids: Vec<i64> = db.get_playlists().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn duplicate_playlist_entry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        let conn = db.connection();
        insert_song(conn, &sample_song("1")).unwrap();
        let pid = insert_playlist(conn, &new_playlist("A")).unwrap();

        insert_playlist_entry(conn, &entry(pid, "1", 10)).unwrap();
        let err = insert_playlist_entry(conn, &entry(pid, "1", 20)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::SchemaConstraint { table: "playlist_songs", .. }
        ));
    }

    #[test]
    fn song_can_only_be_liked_once() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        insert_song(db.connection(), &sample_song("1")).unwrap();

        insert_liked_song(db.connection(), &liked("1", 10)).unwrap();
        let err = insert_liked_song(db.connection(), &liked("1", 20)).unwrap_err();
        assert!(matches!(err, CatalogError::SchemaConstraint { table: "liked_songs", .. }));
    }

    #[test]
    fn entries_require_existing_song_and_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        let pid = insert_playlist(db.connection(), &new_playlist("A")).unwrap();

        let err = insert_playlist_entry(db.connection(), &entry(pid, "404", 10)).unwrap_err();
        assert!(matches!(err, CatalogError::SchemaConstraint { .. }));
        let err = insert_liked_song(db.connection(), &liked("404", 10)).unwrap_err();
        assert!(matches!(err, CatalogError::SchemaConstraint { .. }));
    }

    #[test]
    fn deleting_song_cascades_to_entries_and_likes() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        let conn = db.connection();
        insert_song(conn, &sample_song("1")).unwrap();
        insert_song(conn, &sample_song("2")).unwrap();
        let pid = insert_playlist(conn, &new_playlist("A")).unwrap();
        insert_playlist_entry(conn, &entry(pid, "1", 10)).unwrap();
        insert_playlist_entry(conn, &entry(pid, "2", 11)).unwrap();
        insert_liked_song(conn, &liked("1", 12)).unwrap();

        conn.execute("DELETE FROM songs WHERE id = ?1", params!["1"]).unwrap();

        let counts = db.table_counts().unwrap();
        assert_eq!(counts.playlist_songs, 1);
        assert_eq!(counts.liked_songs, 0);
        assert_eq!(db.playlists_containing("1").unwrap(), 0);
        assert_eq!(db.playlists_containing("2").unwrap(), 1);
    }

    #[test]
    fn deleting_playlist_cascades_to_entries() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        let conn = db.connection();
        insert_song(conn, &sample_song("1")).unwrap();
        let pid = insert_playlist(conn, &new_playlist("A")).unwrap();
        insert_playlist_entry(conn, &entry(pid, "1", 10)).unwrap();

        conn.execute("DELETE FROM playlists WHERE id = ?1", params![pid]).unwrap();

        let counts = db.table_counts().unwrap();
        assert_eq!(counts.playlist_songs, 0);
        assert_eq!(counts.songs, 1);
    }

    #[test]
    fn get_song_reads_back_all_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::create(dir.path().join("db.sqlite")).unwrap();
        let mut song = sample_song("7");
        song.album_art = Some("https://example.com/a.jpg".to_string());
        insert_song(db.connection(), &song).unwrap();

        assert_eq!(db.get_song("7").unwrap(), Some(song));
        assert_eq!(db.get_song("8").unwrap(), None);
    }
}
