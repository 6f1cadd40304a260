//! Batch runner over a URL list file.
//!
//! Reads the whole file up front (one URL per line), then feeds each URL
//! through the orchestrator. One URL's failure never aborts the batch.

use crate::cli::Output;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use std::path::Path;
use tracing::{error, info, instrument};

/// Outcome counts for one batch run.
#[derive(Debug, Default, PartialEq)]
pub struct BatchSummary {
    /// URLs processed to completion.
    pub processed: usize,
    /// URLs skipped because a record already existed.
    pub skipped: usize,
    /// URLs that failed in some phase.
    pub failed: usize,
}

/// Read the URL list file: one URL per line, blank lines ignored.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Process every URL in the file, independently of other URLs' outcomes.
#[instrument(skip_all, fields(file = %url_file.display()))]
pub async fn run_batch(orchestrator: &Orchestrator, url_file: &Path) -> Result<BatchSummary> {
    let urls = read_url_file(url_file)?;
    info!("Read {} URLs from {}", urls.len(), url_file.display());

    let mut summary = BatchSummary::default();

    for url in &urls {
        Output::info(&format!("Processing {}", url));

        match orchestrator.process_url(url).await {
            Ok(outcome) if outcome.skipped => {
                Output::info("Already processed, skipping");
                summary.skipped += 1;
            }
            Ok(outcome) => {
                if let Some(path) = &outcome.transcript_path {
                    Output::success(&format!("Transcript saved to {}", path.display()));
                }
                summary.processed += 1;
            }
            Err(e) => {
                error!("Processing {} failed: {}", url, e);
                Output::error(&format!("Failed: {}", e));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_url_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com/a").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://example.com/b  ").unwrap();
        writeln!(file, "   ").unwrap();

        let urls = read_url_file(file.path()).unwrap();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_read_url_file_missing() {
        assert!(read_url_file(Path::new("/nonexistent/urls.txt")).is_err());
    }
}
