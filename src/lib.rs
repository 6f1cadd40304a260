//! Skriv - Batch Video Transcription
//!
//! A CLI tool that turns a list of video URLs into time-stamped transcripts.
//!
//! The name "Skriv" comes from the Norwegian/Scandinavian word for "write."
//!
//! # Overview
//!
//! For each URL, Skriv:
//! - Downloads the video and extracts its audio track
//! - Splits the audio timeline into overlapping windows plus short
//!   boundary probes
//! - Transcribes every window in parallel against a speech-to-text backend
//! - Reconciles window boundaries so words are neither dropped nor
//!   duplicated where windows meet
//! - Persists the result keyed by URL, so repeated runs skip finished work
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `video` - Video acquisition (yt-dlp)
//! - `audio` - Audio extraction and clipping (ffmpeg/ffprobe)
//! - `transcription` - Windowing, parallel transcription, reconciliation
//! - `store` - Processed-record persistence (SQLite)
//! - `orchestrator` - Per-URL pipeline coordination
//! - `batch` - URL-list iteration
//!
//! # Example
//!
//! ```rust,no_run
//! use skriv::config::Settings;
//! use skriv::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let outcome = orchestrator
//!         .process_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("Skipped: {}", outcome.skipped);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod store;
pub mod transcription;
pub mod video;

pub use error::{Result, SkrivError};
