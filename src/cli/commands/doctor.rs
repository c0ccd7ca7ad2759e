//! Doctor command - verify API key and configuration.

use crate::cli::Output;
use crate::config::{mask_secret, Settings};
use console::style;
use url::Url;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("ytlens Doctor");
    println!();
    println!("Checking API key and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    checks.push(check_api_key(settings.youtube.api_key()));
    checks.push(check_url("API base URL", &settings.youtube.api_base_url));
    checks.push(check_url("Watch page URL", &settings.transcript.watch_base_url));
    for check in &checks {
        check.print();
    }

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using ytlens.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! ytlens is ready to use.");
    }

    Ok(())
}

/// Check that a Data API key is configured. Transcripts work without one.
fn check_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("AIza") && key.len() >= 30 => CheckResult::ok(
            "YOUTUBE_API_KEY",
            &format!("configured ({})", mask_secret(key)),
        ),
        Some(key) => CheckResult::warning(
            "YOUTUBE_API_KEY",
            &format!("set but format looks unusual ({})", mask_secret(key)),
            "Expected format: AIza... (Google API key)",
        ),
        None => CheckResult::warning(
            "YOUTUBE_API_KEY",
            "not set (only get_transcript will work)",
            "Set with: export YOUTUBE_API_KEY='AIza...'",
        ),
    }
}

fn check_url(name: &str, value: &str) -> CheckResult {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => CheckResult::ok(name, value),
        Ok(_) => CheckResult::error(name, value, "Use an http(s) URL"),
        Err(e) => CheckResult::error(name, &format!("invalid: {}", e), "Fix the URL in the config file"),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if !config_path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ytlens config init",
        );
    }

    match Settings::load_from(Some(&config_path)) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", config_path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{} ({})", config_path.display(), e),
            "Fix or regenerate with: ytlens config init --force",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_api_key() {
        let result = check_api_key(Some("AIzaSyA1234567890abcdefghijklmnopqr"));
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("AIza...opqr"));

        let result = check_api_key(Some("not-a-google-key"));
        assert_eq!(result.status, CheckStatus::Warning);

        let result = check_api_key(None);
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.hint.is_some());
    }

    #[test]
    fn test_check_url() {
        assert_eq!(
            check_url("API", "https://www.googleapis.com/youtube/v3").status,
            CheckStatus::Ok
        );
        assert_eq!(check_url("API", "not a url").status, CheckStatus::Error);
        assert_eq!(check_url("API", "ftp://example.com").status, CheckStatus::Error);
    }
}
