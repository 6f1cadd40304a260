//! Record store abstraction for processed videos.
//!
//! One row per processed URL; the existence of a row is the idempotency
//! signal that lets repeated runs skip already-processed videos.

mod sqlite;

pub use sqlite::SqliteRecordStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A processed-video record.
#[derive(Debug, Clone)]
pub struct VideoRecord {
    /// Source URL; unique per record.
    pub video_url: String,
    /// Path of the downloaded video file.
    pub video_path: String,
    /// Path of the extracted audio file.
    pub audio_path: String,
    /// Final reconciled transcript text.
    pub transcript: String,
    /// When processing completed.
    pub processed_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(video_url: String, video_path: String, audio_path: String, transcript: String) -> Self {
        Self {
            video_url,
            video_path,
            audio_path,
            transcript,
            processed_at: Utc::now(),
        }
    }
}

/// Durable storage of processed-video records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Check whether a record exists for the given URL.
    async fn exists(&self, video_url: &str) -> Result<bool>;

    /// Insert a new record. Inserting a URL that already has a record is a
    /// no-op; the row count for a URL never exceeds one.
    async fn insert(&self, record: &VideoRecord) -> Result<()>;

    /// List all stored records, most recent first.
    async fn list(&self) -> Result<Vec<VideoRecord>>;

    /// Total number of stored records.
    async fn count(&self) -> Result<usize>;
}
