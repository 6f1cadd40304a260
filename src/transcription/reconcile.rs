//! Boundary reconciliation between adjacent transcription windows.
//!
//! Each full window overlaps the next segment by the probe length, and a
//! short probe window sits at every internal boundary. When the probe's
//! leading word is absent from the tail of the preceding full transcript,
//! the full window most likely clipped that word mid-utterance and it is
//! appended.
//!
//! This is a best-effort heuristic, not a guaranteed-correct merge: it
//! assumes the true overlap is at most one word, compares tokens
//! case-sensitively, and can be fooled by punctuation-adjacent tokens.

use super::models::TranscriptFragment;

/// Merge probe transcripts into the full-window transcripts.
///
/// Returns one corrected body text per full fragment, in order. The last
/// full fragment is always emitted verbatim since no probe follows it.
/// Emitted texts are whitespace-normalized (tokenized and re-joined).
pub fn reconcile(
    full: &[TranscriptFragment],
    probes: &[TranscriptFragment],
    overlap_words: usize,
) -> Vec<String> {
    let mut corrected = Vec::with_capacity(full.len());

    if full.is_empty() {
        return corrected;
    }

    for (i, fragment) in full[..full.len() - 1].iter().enumerate() {
        let words: Vec<&str> = fragment.text.split_whitespace().collect();

        let probe_head = probes
            .get(i)
            .and_then(|p| p.text.split_whitespace().next());

        let segment = match probe_head {
            Some(head) => {
                let tail_start = words.len().saturating_sub(overlap_words);
                let tail = &words[tail_start..];

                let exact_match = tail.len() == 1 && tail[0] == head;
                if !exact_match && !tail.contains(&head) {
                    // The probe caught a word the full window clipped at
                    // its trailing edge.
                    let mut text = words.join(" ");
                    text.push(' ');
                    text.push_str(head);
                    text
                } else {
                    words.join(" ")
                }
            }
            // Empty probe text: nothing to compare against.
            None => words.join(" "),
        };

        corrected.push(segment);
    }

    corrected.push(full[full.len() - 1].text.clone());
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::models::Window;

    fn fragment(index: usize, offset: f64, text: &str) -> TranscriptFragment {
        TranscriptFragment::ok(index, &Window::new(offset, 63.0), text.to_string())
    }

    #[test]
    fn test_missing_word_is_appended() {
        let full = vec![
            fragment(0, 0.0, "the quick brown"),
            fragment(1, 60.0, "fox jumps over"),
        ];
        let probes = vec![fragment(0, 60.0, "fox")];

        let corrected = reconcile(&full, &probes, 3);
        assert_eq!(corrected, vec!["the quick brown fox", "fox jumps over"]);
    }

    #[test]
    fn test_word_already_in_tail_is_not_duplicated() {
        let full = vec![
            fragment(0, 0.0, "the quick brown fox"),
            fragment(1, 60.0, "fox jumps over"),
        ];
        let probes = vec![fragment(0, 60.0, "fox")];

        let corrected = reconcile(&full, &probes, 3);
        assert_eq!(corrected, vec!["the quick brown fox", "fox jumps over"]);
    }

    #[test]
    fn test_exact_single_word_tail_match() {
        let full = vec![fragment(0, 0.0, "fox"), fragment(1, 60.0, "jumps over")];
        let probes = vec![fragment(0, 60.0, "fox ran")];

        let corrected = reconcile(&full, &probes, 3);
        assert_eq!(corrected, vec!["fox", "jumps over"]);
    }

    #[test]
    fn test_last_segment_always_verbatim() {
        let full = vec![
            fragment(0, 0.0, "first segment"),
            fragment(1, 60.0, "  last   segment  with  odd   spacing "),
        ];
        let probes = vec![fragment(0, 60.0, "word")];

        let corrected = reconcile(&full, &probes, 3);
        // The last segment is not even whitespace-normalized.
        assert_eq!(corrected[1], "  last   segment  with  odd   spacing ");
    }

    #[test]
    fn test_empty_probe_leaves_segment_unchanged() {
        let full = vec![
            fragment(0, 0.0, "the quick brown"),
            fragment(1, 60.0, "tail"),
        ];
        let probes = vec![fragment(0, 60.0, "")];

        let corrected = reconcile(&full, &probes, 3);
        assert_eq!(corrected[0], "the quick brown");
    }

    #[test]
    fn test_empty_full_segment_gains_probe_word() {
        let full = vec![fragment(0, 0.0, ""), fragment(1, 60.0, "tail")];
        let probes = vec![fragment(0, 60.0, "hello")];

        let corrected = reconcile(&full, &probes, 3);
        assert_eq!(corrected[0], " hello");
    }

    #[test]
    fn test_single_fragment_no_probes() {
        let full = vec![fragment(0, 0.0, "only segment")];
        let corrected = reconcile(&full, &[], 3);
        assert_eq!(corrected, vec!["only segment"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(reconcile(&[], &[], 3).is_empty());
    }
}
