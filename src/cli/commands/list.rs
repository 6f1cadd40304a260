//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    match orchestrator.store().list().await {
        Ok(records) => {
            if records.is_empty() {
                Output::info("No videos processed yet. Use 'skriv transcribe <url>' to add one.");
            } else {
                Output::header(&format!("Processed Videos ({})", records.len()));
                println!();

                for record in &records {
                    Output::record_line(
                        &record.video_url,
                        record.transcript.len(),
                        &record.processed_at.format("%Y-%m-%d %H:%M").to_string(),
                    );
                }

                println!();
                Output::kv("Total records", &records.len().to_string());
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list records: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
