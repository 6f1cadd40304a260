//! Bounded-concurrency worker pool over transcription windows.
//!
//! Windows are dispatched to the speech backend in parallel, up to a fixed
//! concurrency bound, and results come back in window index order no matter
//! which calls finish first. One window's failure never aborts the batch:
//! it degrades to an error-marker fragment for that window.

use super::models::TranscriptFragment;
use super::{SpeechBackend, SpeechOutcome, Window};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Transcribe every window of one batch, preserving input order.
///
/// `fragments[i]` always corresponds to `windows[i]`. The call returns only
/// once every dispatched window has resolved (a full-batch barrier).
#[instrument(skip_all, fields(windows = windows.len()))]
pub async fn transcribe_windows(
    backend: Arc<dyn SpeechBackend>,
    audio_path: &Path,
    windows: &[Window],
    max_concurrent: usize,
    progress: Option<&indicatif::ProgressBar>,
) -> Vec<TranscriptFragment> {
    if windows.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(usize, TranscriptFragment)> =
        stream::iter(windows.iter().copied().enumerate())
            .map(|(idx, window)| {
                let backend = backend.clone();
                let audio_path = audio_path.to_path_buf();
                async move {
                    let outcome = backend
                        .transcribe_span(&audio_path, window.offset, window.length)
                        .await;
                    (idx, fragment_from_outcome(idx, &window, outcome))
                }
            })
            .buffer_unordered(max_concurrent.max(1))
            .inspect(|_| {
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            })
            .collect()
            .await;

    // Completion order is arbitrary; reconciliation is index-based.
    results.sort_by_key(|(idx, _)| *idx);

    results.into_iter().map(|(_, fragment)| fragment).collect()
}

/// Map a backend outcome onto a fragment for one window.
fn fragment_from_outcome(
    idx: usize,
    window: &Window,
    outcome: crate::error::Result<SpeechOutcome>,
) -> TranscriptFragment {
    match outcome {
        Ok(SpeechOutcome::Text(text)) if !text.trim().is_empty() => {
            debug!("Window {} at {:.0}s transcribed", idx, window.offset);
            TranscriptFragment::ok(idx, window, text.trim().to_string())
        }
        Ok(_) => {
            debug!("Window {} at {:.0}s had no speech", idx, window.offset);
            TranscriptFragment::inaudible(idx, window)
        }
        Err(e) => {
            warn!("Window {} at {:.0}s failed: {}", idx, window.offset, e);
            TranscriptFragment::backend_error(idx, window, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SkrivError};
    use crate::transcription::models::FragmentStatus;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Backend whose latency decreases with offset, so later windows
    /// complete before earlier ones.
    struct ReversedLatencyBackend;

    #[async_trait]
    impl SpeechBackend for ReversedLatencyBackend {
        async fn transcribe_span(
            &self,
            _audio_path: &Path,
            offset: f64,
            _length: f64,
        ) -> Result<SpeechOutcome> {
            let delay = 50u64.saturating_sub(offset as u64 / 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(SpeechOutcome::Text(format!("window at {}", offset)))
        }
    }

    /// Backend that fails for one specific offset.
    struct FlakyBackend {
        failing_offset: f64,
    }

    #[async_trait]
    impl SpeechBackend for FlakyBackend {
        async fn transcribe_span(
            &self,
            _audio_path: &Path,
            offset: f64,
            _length: f64,
        ) -> Result<SpeechOutcome> {
            if offset == self.failing_offset {
                Err(SkrivError::OpenAI("connection reset".to_string()))
            } else if offset >= 240.0 {
                Ok(SpeechOutcome::NoSpeech)
            } else {
                Ok(SpeechOutcome::Text("ok".to_string()))
            }
        }
    }

    fn five_windows() -> Vec<Window> {
        (0..5).map(|i| Window::new(i as f64 * 60.0, 63.0)).collect()
    }

    #[tokio::test]
    async fn test_results_in_window_order_despite_completion_order() {
        let windows = five_windows();
        let fragments = transcribe_windows(
            Arc::new(ReversedLatencyBackend),
            Path::new("/tmp/audio.wav"),
            &windows,
            2,
            None,
        )
        .await;

        assert_eq!(fragments.len(), 5);
        for (i, fragment) in fragments.iter().enumerate() {
            assert_eq!(fragment.index, i);
            assert_eq!(fragment.text, format!("window at {}", i as f64 * 60.0));
        }
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let windows = five_windows();
        let fragments = transcribe_windows(
            Arc::new(FlakyBackend {
                failing_offset: 120.0,
            }),
            Path::new("/tmp/audio.wav"),
            &windows,
            4,
            None,
        )
        .await;

        assert_eq!(fragments.len(), 5);
        assert_eq!(fragments[0].status, FragmentStatus::Ok);
        assert!(matches!(
            fragments[2].status,
            FragmentStatus::BackendError(_)
        ));
        assert!(fragments[2].text.starts_with("[Error:"));
        assert_eq!(fragments[4].status, FragmentStatus::Inaudible);
        assert_eq!(fragments[4].text, "[Inaudible]");
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let fragments = transcribe_windows(
            Arc::new(ReversedLatencyBackend),
            Path::new("/tmp/audio.wav"),
            &[],
            2,
            None,
        )
        .await;
        assert!(fragments.is_empty());
    }

    #[tokio::test]
    async fn test_labels_follow_window_offsets() {
        let windows = five_windows();
        let fragments = transcribe_windows(
            Arc::new(ReversedLatencyBackend),
            Path::new("/tmp/audio.wav"),
            &windows,
            28,
            None,
        )
        .await;

        assert_eq!(fragments[0].label, "00:00:00");
        assert_eq!(fragments[1].label, "00:01:00");
        assert_eq!(fragments[4].label, "00:04:00");
    }
}
