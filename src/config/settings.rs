//! Configuration settings for Skriv.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub store: StoreSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where downloaded videos, extracted audio, and transcripts land.
    pub download_dir: String,
    /// Directory for temporary files (window clips).
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            download_dir: "~/.skriv/downloads".to_string(),
            temp_dir: "/tmp/skriv".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcription pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Speech-to-text model to use.
    pub model: String,
    /// Length of each primary transcription window in seconds.
    pub segment_seconds: f64,
    /// Length of the boundary probe windows in seconds.
    pub probe_seconds: f64,
    /// Number of trailing words compared at each window boundary.
    pub overlap_words: usize,
    /// Upper bound on simultaneous backend calls within one batch.
    pub max_concurrent_windows: usize,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            segment_seconds: 60.0,
            probe_seconds: 3.0,
            overlap_words: 3,
            max_concurrent_windows: 28,
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database file.
    pub sqlite_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.skriv/records.db".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkrivError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skriv")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded download directory path.
    pub fn download_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.download_dir)
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.store.sqlite_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.transcription.segment_seconds, 60.0);
        assert_eq!(settings.transcription.probe_seconds, 3.0);
        assert_eq!(settings.transcription.overlap_words, 3);
        assert_eq!(settings.transcription.max_concurrent_windows, 28);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [transcription]
            segment_seconds = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.transcription.segment_seconds, 30.0);
        assert_eq!(settings.transcription.probe_seconds, 3.0);
        assert_eq!(settings.general.log_level, "info");
    }
}
