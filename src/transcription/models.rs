//! Data models for the windowed transcription pipeline.

use serde::{Deserialize, Serialize};

/// Marker text used in place of a transcript when no speech was detected.
pub const INAUDIBLE_MARKER: &str = "[Inaudible]";

/// A contiguous time span of audio submitted as one transcription unit.
///
/// Windows are immutable once constructed; identity is their index within
/// the batch they belong to (full or probe).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Offset from the start of the audio, in seconds.
    pub offset: f64,
    /// Window length in seconds. May overrun the end of the audio; the
    /// backend clamps to the available samples.
    pub length: f64,
}

impl Window {
    pub fn new(offset: f64, length: f64) -> Self {
        Self { offset, length }
    }
}

/// Outcome status of transcribing one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentStatus {
    /// The backend returned usable text.
    Ok,
    /// The backend could not detect speech in the window.
    Inaudible,
    /// The request to the backend failed (transport or API error).
    BackendError(String),
}

/// The transcription result for exactly one window.
///
/// Fragment order is index order, not completion order; the reconciler
/// depends on `fragments[i]` matching `windows[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptFragment {
    /// Index of the window this fragment belongs to.
    pub index: usize,
    /// Timestamp label (`HH:MM:SS`) derived from the window's offset.
    pub label: String,
    /// Transcript body text. For non-ok fragments this holds the
    /// inaudible/error marker.
    pub text: String,
    /// Transcription outcome.
    pub status: FragmentStatus,
}

impl TranscriptFragment {
    pub fn ok(index: usize, window: &Window, text: String) -> Self {
        Self {
            index,
            label: format_offset_label(window.offset),
            text,
            status: FragmentStatus::Ok,
        }
    }

    pub fn inaudible(index: usize, window: &Window) -> Self {
        Self {
            index,
            label: format_offset_label(window.offset),
            text: INAUDIBLE_MARKER.to_string(),
            status: FragmentStatus::Inaudible,
        }
    }

    pub fn backend_error(index: usize, window: &Window, detail: String) -> Self {
        Self {
            index,
            label: format_offset_label(window.offset),
            text: format!("[Error: {}]", detail),
            status: FragmentStatus::BackendError(detail),
        }
    }

    /// Render this fragment as a transcript line.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.label, self.text)
    }
}

/// Format a window offset as a zero-padded `HH:MM:SS` label.
///
/// Uses gmtime-style wall-clock semantics: hours wrap past 24.
pub fn format_offset_label(offset_seconds: f64) -> String {
    let total_seconds = offset_seconds as u64;
    let hours = (total_seconds / 3600) % 24;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset_label() {
        assert_eq!(format_offset_label(0.0), "00:00:00");
        assert_eq!(format_offset_label(60.0), "00:01:00");
        assert_eq!(format_offset_label(3725.0), "01:02:05");
        // Fractional seconds truncate
        assert_eq!(format_offset_label(59.9), "00:00:59");
    }

    #[test]
    fn test_format_offset_label_wraps_past_24h() {
        assert_eq!(format_offset_label(24.0 * 3600.0 + 61.0), "00:01:01");
    }

    #[test]
    fn test_fragment_render() {
        let window = Window::new(120.0, 63.0);
        let fragment = TranscriptFragment::ok(2, &window, "hello there".to_string());
        assert_eq!(fragment.render(), "[00:02:00] hello there");

        let fragment = TranscriptFragment::inaudible(2, &window);
        assert_eq!(fragment.render(), "[00:02:00] [Inaudible]");

        let fragment = TranscriptFragment::backend_error(2, &window, "timeout".to_string());
        assert_eq!(fragment.render(), "[00:02:00] [Error: timeout]");
        assert_eq!(
            fragment.status,
            FragmentStatus::BackendError("timeout".to_string())
        );
    }
}
