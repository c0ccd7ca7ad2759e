//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: &Settings, path: Option<&str>) -> Result<()> {
    let config_path = match path {
        Some(p) => Settings::expand_path(p),
        None => Settings::default_config_path(),
    };

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings.redacted())
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }

        ConfigAction::Init { force } => {
            init_config(&config_path, *force)?;
        }
    }

    Ok(())
}

/// Write a default config file, refusing to clobber an existing one.
fn init_config(config_path: &PathBuf, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        Output::warning(&format!(
            "Config already exists at {}",
            config_path.display()
        ));
        Output::info("Use --force to overwrite it.");
        return Ok(());
    }

    Settings::default().save_to(config_path)?;
    Output::success(&format!("Created default config at {}", config_path.display()));
    Output::info("Set youtube.api_key there, or export YOUTUBE_API_KEY.");
    Ok(())
}
