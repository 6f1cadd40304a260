//! Window computation for the transcription timeline.
//!
//! The audio timeline is tiled with fixed-length "full" windows, each
//! stretched by a trailing probe-length overlap into the next segment.
//! A short "probe" window is anchored at every internal boundary so the
//! reconciler can detect words the preceding full window truncated.

use super::models::Window;

/// Compute the full and probe window sets for an audio timeline.
///
/// With `N = floor(total_duration / segment_len)`:
/// - `N` full windows at offsets `i * segment_len`, each
///   `segment_len + probe_len` long;
/// - `N - 1` probe windows at each internal boundary `i * segment_len`
///   (for `i` in `1..N`), each `probe_len` long.
///
/// Audio shorter than one segment yields no windows at all. Windows near
/// the end may overrun `total_duration`; the backend clamps when reading.
pub fn compute_windows(
    total_duration: f64,
    segment_len: f64,
    probe_len: f64,
) -> (Vec<Window>, Vec<Window>) {
    let count = if segment_len > 0.0 {
        (total_duration / segment_len) as usize
    } else {
        0
    };

    let full = (0..count)
        .map(|i| Window::new(i as f64 * segment_len, segment_len + probe_len))
        .collect();

    let probes = (1..count)
        .map(|i| Window::new(i as f64 * segment_len, probe_len))
        .collect();

    (full, probes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments_with_probes() {
        let (full, probes) = compute_windows(185.0, 60.0, 3.0);

        assert_eq!(full.len(), 3);
        assert_eq!(probes.len(), 2);

        for (i, window) in full.iter().enumerate() {
            assert_eq!(window.offset, i as f64 * 60.0);
            assert_eq!(window.length, 63.0);
        }

        assert_eq!(probes[0], Window::new(60.0, 3.0));
        assert_eq!(probes[1], Window::new(120.0, 3.0));
    }

    #[test]
    fn test_audio_shorter_than_one_segment() {
        let (full, probes) = compute_windows(30.0, 60.0, 3.0);
        assert!(full.is_empty());
        assert!(probes.is_empty());
    }

    #[test]
    fn test_single_segment_has_no_probes() {
        let (full, probes) = compute_windows(90.0, 60.0, 3.0);
        assert_eq!(full.len(), 1);
        assert!(probes.is_empty());
        // The lone full window still carries the probe-length overlap
        assert_eq!(full[0], Window::new(0.0, 63.0));
    }

    #[test]
    fn test_zero_duration() {
        let (full, probes) = compute_windows(0.0, 60.0, 3.0);
        assert!(full.is_empty());
        assert!(probes.is_empty());
    }

    #[test]
    fn test_exact_multiple_overruns_end() {
        // 120s of audio: the second full window spans 60..123, past the end.
        // It is emitted anyway; clamping happens at the backend.
        let (full, _) = compute_windows(120.0, 60.0, 3.0);
        assert_eq!(full.len(), 2);
        assert_eq!(full[1], Window::new(60.0, 63.0));
    }
}
