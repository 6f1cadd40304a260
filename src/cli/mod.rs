//! CLI module for Skriv.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skriv - Batch Video Transcription
///
/// Downloads videos, extracts their audio, and produces time-stamped
/// transcripts by transcribing overlapping windows in parallel and
/// stitching the results. The name "Skriv" comes from the Norwegian/
/// Scandinavian word for "write."
#[derive(Parser, Debug)]
#[command(name = "skriv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Skriv and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Process every URL in a list file (one URL per line)
    Run {
        /// Path to the URL list file
        file: String,
    },

    /// Transcribe a single video URL
    Transcribe {
        /// Video URL
        url: String,
    },

    /// List processed videos
    List,
}
