//! Audio extraction and probing utilities.
//!
//! Thin wrappers over ffmpeg/ffprobe subprocesses: extracting the audio
//! track from a downloaded video, clipping a time span out of an audio
//! file, and querying total duration.

use crate::error::{Result, SkrivError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Extract the audio track of a video file to a WAV next to it.
///
/// The audio file gets the same base name as the video. Returns the audio
/// path and the total duration of the underlying media in seconds.
#[instrument(skip_all, fields(video = %video_path.display()))]
pub async fn extract_audio(video_path: &Path) -> Result<(PathBuf, f64)> {
    let audio_path = video_path.with_extension("wav");

    info!("Extracting audio from {}", video_path.display());

    let result = Command::new("ffmpeg")
        .arg("-i").arg(video_path)
        .arg("-vn")
        .arg("-acodec").arg("pcm_s16le")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(&audio_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => {}
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            return Err(SkrivError::AudioExtraction(format!(
                "ffmpeg failed: {err}"
            )));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SkrivError::ToolNotFound("ffmpeg".into()));
        }
        Err(e) => {
            return Err(SkrivError::AudioExtraction(format!("ffmpeg error: {e}")));
        }
    }

    let duration = probe_duration(&audio_path).await?;
    info!("Audio extracted ({:.1}s)", duration);

    Ok((audio_path, duration))
}

/// Clip `[start, start+length)` out of an audio file.
///
/// Tries a stream copy first, falling back to re-encoding. ffmpeg clamps
/// the span to the available samples, so windows overrunning the end of
/// the audio are safe.
pub async fn clip_span(source: &Path, dest: &Path, start: f64, length: f64) -> Result<()> {
    let copy_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-c").arg("copy")
        .arg("-y")
        .arg("-loglevel").arg("warning")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    if let Ok(status) = copy_result {
        if status.success() && dest.exists() {
            return Ok(());
        }
    }

    warn!("Stream copy failed, re-encoding clip");

    let encode_result = Command::new("ffmpeg")
        .arg("-ss").arg(format!("{:.3}", start))
        .arg("-i").arg(source)
        .arg("-t").arg(format!("{:.3}", length))
        .arg("-acodec").arg("pcm_s16le")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match encode_result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(SkrivError::AudioExtraction(format!(
                "Clip extraction failed: {err}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SkrivError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(SkrivError::AudioExtraction(format!("ffmpeg error: {e}"))),
    }
}

/// Query the duration of a media file using ffprobe with JSON output.
pub async fn probe_duration(path: &Path) -> Result<f64> {
    debug!("Probing duration of {}", path.display());

    let result = Command::new("ffprobe")
        .arg("-v").arg("quiet")
        .arg("-print_format").arg("json")
        .arg("-show_format")
        .arg(path)
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SkrivError::ToolNotFound("ffprobe".into()));
        }
        Err(e) => {
            return Err(SkrivError::AudioExtraction(format!("ffprobe failed: {e}")));
        }
    };

    if !output.status.success() {
        return Err(SkrivError::AudioExtraction("ffprobe returned error".into()));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|_| SkrivError::AudioExtraction("Invalid ffprobe output".into()))?;

    parsed["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| SkrivError::AudioExtraction("Could not determine audio duration".into()))
}
