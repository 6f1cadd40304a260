//! Run command - process a URL list file.

use crate::batch::run_batch;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::Path;

/// Run the batch command over a URL list file.
pub async fn run_batch_file(file: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcribe)?;

    let orchestrator = Orchestrator::new(settings)?;
    let summary = run_batch(&orchestrator, Path::new(file)).await?;

    println!();
    Output::header("Batch complete");
    Output::kv("Processed", &summary.processed.to_string());
    Output::kv("Skipped", &summary.skipped.to_string());
    Output::kv("Failed", &summary.failed.to_string());

    if summary.failed > 0 {
        Output::warning("Some URLs failed; re-run to retry them (completed URLs are skipped).");
    }

    Ok(())
}
