//! Transcribe command - process a single URL.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the transcribe command for one URL.
pub async fn run_transcribe(url: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcribe)?;

    let orchestrator = Orchestrator::new(settings)?;

    Output::info(&format!("Processing {}", url));

    let outcome = orchestrator.process_url(url).await?;

    if outcome.skipped {
        Output::info("Already processed, skipping. Remove the record to re-process.");
    } else if let Some(path) = &outcome.transcript_path {
        Output::success(&format!("Transcript saved to {}", path.display()));
    }

    Ok(())
}
