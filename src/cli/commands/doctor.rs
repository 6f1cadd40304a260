//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;
use std::process::Command;

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// Outcome of one diagnostic check.
struct Check {
    name: &'static str,
    status: CheckStatus,
    message: String,
    hint: Option<&'static str>,
}

impl Check {
    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(self.name).bold(), self.message);

        if let Some(hint) = self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Skriv Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    for (tool, version_arg) in [("yt-dlp", "--version"), ("ffmpeg", "-version"), ("ffprobe", "-version")] {
        let check = check_tool(tool, version_arg);
        check.print();
        checks.push(check);
    }

    println!();
    println!("{}", style("API Configuration").bold());
    let check = check_api_key();
    check.print();
    checks.push(check);

    println!();
    println!("{}", style("Paths").bold());
    for check in [
        check_path("Download directory", &settings.download_dir(), "Created on first use"),
        check_path("Database", &settings.sqlite_path(), "Created on first transcription"),
    ] {
        check.print();
        checks.push(check);
    }

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found. Please fix them before using Skriv.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Skriv is ready to use.");
    }

    Ok(())
}

fn check_tool(name: &'static str, version_arg: &str) -> Check {
    let hint = install_hint(name);

    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            Check {
                name,
                status: CheckStatus::Ok,
                message: version,
                hint: None,
            }
        }
        Ok(_) => Check {
            name,
            status: CheckStatus::Error,
            message: "installed but not working".to_string(),
            hint: Some(hint),
        },
        Err(_) => Check {
            name,
            status: CheckStatus::Error,
            message: "not found".to_string(),
            hint: Some(hint),
        },
    }
}

fn check_api_key() -> Check {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.chars().count() > 20 => {
            let masked = mask_key(&key);
            Check {
                name: "OPENAI_API_KEY",
                status: CheckStatus::Ok,
                message: format!("configured ({})", masked),
                hint: None,
            }
        }
        Ok(key) if !key.is_empty() => Check {
            name: "OPENAI_API_KEY",
            status: CheckStatus::Warning,
            message: "set but format looks unusual".to_string(),
            hint: Some("Expected format: sk-... (OpenAI API key)"),
        },
        _ => Check {
            name: "OPENAI_API_KEY",
            status: CheckStatus::Error,
            message: "not set".to_string(),
            hint: Some("Set with: export OPENAI_API_KEY='sk-...'"),
        },
    }
}

/// Show only the first and last few characters of a key. Slices on char
/// boundaries so keys with multi-byte characters never panic.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(7).collect();
    let chars: Vec<char> = key.chars().collect();
    let suffix: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

fn check_path(name: &'static str, path: &Path, absent_hint: &'static str) -> Check {
    if path.exists() {
        Check {
            name,
            status: CheckStatus::Ok,
            message: path.display().to_string(),
            hint: None,
        }
    } else {
        Check {
            name,
            status: CheckStatus::Warning,
            message: format!("{} (missing)", path.display()),
            hint: Some(absent_hint),
        }
    }
}

/// Platform-specific install hint.
fn install_hint(tool: &str) -> &'static str {
    match tool {
        "yt-dlp" => {
            if cfg!(target_os = "macos") {
                "Install with: brew install yt-dlp"
            } else if cfg!(target_os = "linux") {
                "Install with: pip install yt-dlp (or your package manager)"
            } else {
                "Install from: https://github.com/yt-dlp/yt-dlp"
            }
        }
        _ => {
            if cfg!(target_os = "macos") {
                "Install with: brew install ffmpeg"
            } else if cfg!(target_os = "linux") {
                "Install with: sudo apt install ffmpeg (or your package manager)"
            } else {
                "Install from: https://ffmpeg.org/download.html"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_path_missing() {
        let check = check_path("Database", Path::new("/nonexistent/db.sqlite"), "created later");
        assert_eq!(check.status, CheckStatus::Warning);
        assert_eq!(check.hint, Some("created later"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-proj-abcdefghijklmnop1234"), "sk-proj...1234");
    }

    #[test]
    fn test_mask_key_multibyte() {
        // Byte slicing would panic here; char-based masking must not.
        assert_eq!(mask_key("sk-prøj-ábcdefghijklmnñp12é4"), "sk-prøj...12é4");
    }

    #[test]
    fn test_install_hint() {
        assert!(install_hint("yt-dlp").contains("yt-dlp"));
        assert!(install_hint("ffmpeg").contains("ffmpeg"));
    }
}
