//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Skriv Setup");
    println!();
    println!("Welcome to Skriv! Let's make sure everything is configured correctly.\n");

    // Step 1: Prerequisites
    println!("{}", style("Step 1: Checking prerequisites").bold().cyan());
    println!();

    let missing = missing_tools();
    if !missing.is_empty() {
        Output::warning("Some tools are missing. Please install them:");
        println!();
        for (name, hint) in &missing {
            println!("  {} {} - not found", style("✗").red(), style(name).bold());
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
        println!();

        if !prompt_continue("Continue anyway?")? {
            println!();
            Output::info("Setup cancelled. Install the missing tools and run 'skriv init' again.");
            return Ok(());
        }
    } else {
        Output::success("All required tools are installed!");
    }

    println!();

    // Step 2: API key
    println!("{}", style("Step 2: Checking API configuration").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Skriv requires an OpenAI API key for transcription.");
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'skriv init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 3: Directories
    println!("{}", style("Step 3: Setting up directories").bold().cyan());
    println!();

    for dir in [settings.download_dir(), settings.temp_dir()] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            Output::success(&format!("Created directory: {}", dir.display()));
        } else {
            Output::info(&format!("Directory exists: {}", dir.display()));
        }
    }

    println!();

    // Step 4: Config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("skriv doctor").cyan());
    println!("  {} Transcribe a single video", style("skriv transcribe <url>").cyan());
    println!("  {} Process a URL list", style("skriv run urls.txt").cyan());

    Ok(())
}

/// Return (name, install hint) for each missing external tool.
fn missing_tools() -> Vec<(&'static str, &'static str)> {
    use std::process::Command;

    let tools: [(&str, &str, &str); 3] = [
        ("yt-dlp", "--version", install_hint("yt-dlp")),
        ("ffmpeg", "-version", install_hint("ffmpeg")),
        ("ffprobe", "-version", install_hint("ffprobe")),
    ];

    tools
        .into_iter()
        .filter(|(name, arg, _)| Command::new(name).arg(arg).output().is_err())
        .map(|(name, _, hint)| (name, hint))
        .collect()
}

/// Get platform-specific install hint.
fn install_hint(tool: &str) -> &'static str {
    match tool {
        "yt-dlp" => {
            if cfg!(target_os = "macos") {
                "Install with: brew install yt-dlp"
            } else if cfg!(target_os = "linux") {
                "Install with: pip install yt-dlp"
            } else {
                "Install from: https://github.com/yt-dlp/yt-dlp"
            }
        }
        "ffmpeg" | "ffprobe" => {
            if cfg!(target_os = "macos") {
                "Install with: brew install ffmpeg"
            } else if cfg!(target_os = "linux") {
                "Install with: sudo apt install ffmpeg"
            } else {
                "Install from: https://ffmpeg.org/download.html"
            }
        }
        _ => "Check the documentation for installation instructions",
    }
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_hints() {
        assert!(install_hint("yt-dlp").contains("yt-dlp"));
        assert!(install_hint("ffmpeg").contains("ffmpeg"));
    }
}
