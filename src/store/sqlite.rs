//! SQLite-backed record store.

use super::{RecordStore, VideoRecord};
use crate::error::{Result, SkrivError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// SQLite-based record store.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) the store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Self::create_schema(&conn)?;

        info!("Initialized record store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory record store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                video_url TEXT NOT NULL,
                video_path TEXT NOT NULL,
                audio_path TEXT NOT NULL,
                transcript TEXT NOT NULL,
                processed_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_videos_url ON videos(video_url);
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SkrivError::Store(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn exists(&self, video_url: &str) -> Result<bool> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM videos WHERE video_url = ?1",
            params![video_url],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    #[instrument(skip(self, record), fields(url = %record.video_url))]
    async fn insert(&self, record: &VideoRecord) -> Result<()> {
        let conn = self.lock()?;

        // The unique index on video_url makes concurrent exists-then-insert
        // races collapse into a single row rather than a duplicate.
        conn.execute(
            r#"
            INSERT OR IGNORE INTO videos (video_url, video_path, audio_path, transcript, processed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.video_url,
                record.video_path,
                record.audio_path,
                record.transcript,
                record.processed_at.to_rfc3339(),
            ],
        )?;

        debug!("Stored record for {}", record.video_url);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<VideoRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT video_url, video_path, audio_path, transcript, processed_at
            FROM videos
            ORDER BY processed_at DESC
            "#,
        )?;

        let records = stmt.query_map([], |row| {
            let processed_at_str: String = row.get(4)?;
            Ok(VideoRecord {
                video_url: row.get(0)?,
                video_path: row.get(1)?,
                audio_path: row.get(2)?,
                transcript: row.get(3)?,
                processed_at: DateTime::parse_from_rfc3339(&processed_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let result: Vec<VideoRecord> = records.filter_map(|r| r.ok()).collect();
        Ok(result)
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> VideoRecord {
        VideoRecord::new(
            url.to_string(),
            "/tmp/video.mp4".to_string(),
            "/tmp/video.wav".to_string(),
            "[00:00:00] hello".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_exists() {
        let store = SqliteRecordStore::in_memory().unwrap();

        assert!(!store.exists("https://example.com/v1").await.unwrap());

        store.insert(&record("https://example.com/v1")).await.unwrap();

        assert!(store.exists("https://example.com/v1").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_single_row() {
        let store = SqliteRecordStore::in_memory().unwrap();

        store.insert(&record("https://example.com/v1")).await.unwrap();
        store.insert(&record("https://example.com/v1")).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_returns_stored_records() {
        let store = SqliteRecordStore::in_memory().unwrap();

        store.insert(&record("https://example.com/v1")).await.unwrap();
        store.insert(&record("https://example.com/v2")).await.unwrap();

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.video_url == "https://example.com/v2"));
        assert_eq!(records[0].transcript, "[00:00:00] hello");
    }
}
