//! Video acquisition via yt-dlp.
//!
//! Fetches the video title, sanitizes it into a filename, and downloads
//! the video into the configured download directory.

use crate::error::{Result, SkrivError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{info, instrument};

/// A downloaded video artifact.
#[derive(Debug, Clone)]
pub struct VideoAsset {
    /// Path of the downloaded video file.
    pub path: PathBuf,
    /// Sanitized title, also the file's base name.
    pub title: String,
}

/// Replace characters that are invalid in file names with `_`.
pub fn sanitize_title(title: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| {
        Regex::new(r#"[\\/:*?"<>|\t\n\r]"#).expect("Invalid regex")
    });
    invalid.replace_all(title, "_").into_owned()
}

/// Fetch the human-readable title of a video.
async fn fetch_title(url: &str) -> Result<String> {
    let output = Command::new("yt-dlp")
        .args(["--dump-json", "--no-download", "--no-warnings", "--no-playlist", url])
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SkrivError::ToolNotFound("yt-dlp".to_string())
            } else {
                SkrivError::VideoDownload(format!("Failed to run yt-dlp: {}", e))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SkrivError::VideoDownload(format!(
            "Video {} not found or unavailable: {}",
            url, stderr
        )));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| SkrivError::VideoDownload(format!("Failed to parse yt-dlp output: {}", e)))?;

    Ok(json["title"].as_str().unwrap_or("Unknown Title").to_string())
}

/// Download a video to `download_dir`, named after its sanitized title.
///
/// If the target file already exists it is reused without re-downloading.
#[instrument(skip(download_dir), fields(url = %url))]
pub async fn download_video(url: &str, download_dir: &Path) -> Result<VideoAsset> {
    std::fs::create_dir_all(download_dir)?;

    let title = sanitize_title(&fetch_title(url).await?);
    let target_path = download_dir.join(format!("{}.mp4", title));

    if target_path.exists() {
        info!("Using cached video file");
        return Ok(VideoAsset {
            path: target_path,
            title,
        });
    }

    info!("Downloading video from {}", url);

    let result = Command::new("yt-dlp")
        .arg("--format").arg("mp4")
        .arg("--output").arg(target_path.to_str().unwrap_or_default())
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings")
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SkrivError::ToolNotFound("yt-dlp".into()));
        }
        Err(e) => {
            return Err(SkrivError::VideoDownload(format!(
                "yt-dlp execution failed: {e}"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SkrivError::VideoDownload(format!("yt-dlp failed: {stderr}")));
    }

    if !target_path.exists() {
        return Err(SkrivError::VideoDownload(
            "Video file not found after download".into(),
        ));
    }

    Ok(VideoAsset {
        path: target_path,
        title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title_replaces_invalid_chars() {
        assert_eq!(
            sanitize_title(r#"a\b/c:d*e?f"g<h>i|j"#),
            "a_b_c_d_e_f_g_h_i_j"
        );
        assert_eq!(sanitize_title("tab\there"), "tab_here");
        assert_eq!(sanitize_title("line\nbreak\rhere"), "line_break_here");
    }

    #[test]
    fn test_sanitize_title_keeps_valid_chars() {
        assert_eq!(
            sanitize_title("My Video - Episode 12 (final)"),
            "My Video - Episode 12 (final)"
        );
    }
}
