//! Error types for Skriv.

use thiserror::Error;

/// Library-level error type for Skriv operations.
#[derive(Error, Debug)]
pub enum SkrivError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video download failed: {0}")]
    VideoDownload(String),

    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for Skriv operations.
pub type Result<T> = std::result::Result<T, SkrivError>;
