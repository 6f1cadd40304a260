//! Pipeline orchestrator for Skriv.
//!
//! Sequences acquisition, audio extraction, windowed transcription, and
//! persistence for one URL, skipping URLs already recorded.

use crate::audio::extract_audio;
use crate::config::Settings;
use crate::error::Result;
use crate::store::{RecordStore, SqliteRecordStore, VideoRecord};
use crate::transcription::{transcribe_timeline, SpeechBackend, WhisperBackend};
use crate::video::download_video;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Skriv pipeline.
pub struct Orchestrator {
    settings: Settings,
    backend: Arc<dyn SpeechBackend>,
    store: Arc<dyn RecordStore>,
}

impl Orchestrator {
    /// Create a new orchestrator with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        let backend: Arc<dyn SpeechBackend> =
            Arc::new(WhisperBackend::with_model(&settings.transcription.model));
        let store: Arc<dyn RecordStore> =
            Arc::new(SqliteRecordStore::new(&settings.sqlite_path())?);

        Self::with_components(settings, backend, store)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        backend: Arc<dyn SpeechBackend>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self> {
        std::fs::create_dir_all(settings.download_dir())?;

        Ok(Self {
            settings,
            backend,
            store,
        })
    }

    /// Get a reference to the record store.
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one URL: download, extract audio, transcribe, persist.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn process_url(&self, url: &str) -> Result<ProcessOutcome> {
        if self.store.exists(url).await? {
            info!("URL already processed, skipping");
            return Ok(ProcessOutcome {
                url: url.to_string(),
                transcript_path: None,
                skipped: true,
            });
        }

        let download_dir = self.settings.download_dir();

        info!("Downloading video");
        eprintln!("  Downloading video...");
        let video = download_video(url, &download_dir).await?;
        eprintln!("  Video downloaded: {}", video.title);

        info!("Extracting audio");
        eprintln!("  Extracting audio...");
        let (audio_path, total_duration) = extract_audio(&video.path).await?;
        eprintln!("  Audio extracted ({:.0}s)", total_duration);

        info!("Transcribing");
        eprintln!("  Transcribing...");
        let transcript = transcribe_timeline(
            self.backend.clone(),
            &audio_path,
            total_duration,
            &self.settings.transcription,
        )
        .await;

        let record = VideoRecord::new(
            url.to_string(),
            video.path.display().to_string(),
            audio_path.display().to_string(),
            transcript.clone(),
        );
        self.store.insert(&record).await?;

        let transcript_path = audio_path.with_extension("txt");
        std::fs::write(&transcript_path, &transcript)?;

        info!("Transcript saved to {}", transcript_path.display());

        Ok(ProcessOutcome {
            url: url.to_string(),
            transcript_path: Some(transcript_path),
            skipped: false,
        })
    }
}

/// Result of processing one URL.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// The source URL.
    pub url: String,
    /// Where the transcript artifact was written, if processing ran.
    pub transcript_path: Option<PathBuf>,
    /// Whether processing was skipped (already recorded).
    pub skipped: bool,
}
