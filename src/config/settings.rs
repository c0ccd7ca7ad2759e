//! Configuration settings for ytlens.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub transcript: TranscriptSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. `YOUTUBE_API_KEY` takes precedence when set.
    pub api_key: Option<String>,
    /// Base URL of the Data API.
    pub api_base_url: String,
    /// Default `maxResults` for video search.
    pub search_max_results: u32,
    /// Default `maxResults` for comment threads.
    pub comment_max_results: u32,
    /// Ordering requested for comment threads (relevance, time).
    pub comment_order: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            search_max_results: 5,
            comment_max_results: 20,
            comment_order: "relevance".to_string(),
        }
    }
}

impl YoutubeSettings {
    /// The configured API key, if it is non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Caption scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Language requested when the caller gives none.
    pub default_language: String,
    /// Site root used to load watch pages.
    pub watch_base_url: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            watch_base_url: "https://www.youtube.com".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytlens")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Apply an API key from the environment or command line over the file value.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.youtube.api_key = Some(key);
        }
        self
    }

    /// Copy of the settings with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.youtube.api_key = self.youtube.api_key().map(mask_secret);
        copy
    }
}

/// Mask all but the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.youtube.search_max_results, 5);
        assert_eq!(settings.youtube.comment_max_results, 20);
        assert_eq!(settings.youtube.comment_order, "relevance");
        assert_eq!(settings.transcript.default_language, "en");
        assert!(settings.youtube.api_key().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [youtube]
            api_key = "AIzaSyExampleKey123"
            comment_order = "time"
            "#,
        )
        .unwrap();

        assert_eq!(settings.youtube.api_key(), Some("AIzaSyExampleKey123"));
        assert_eq!(settings.youtube.comment_order, "time");
        assert_eq!(settings.youtube.comment_max_results, 20);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let mut settings = Settings::default();
        settings.youtube.api_key = Some("   ".to_string());
        assert!(settings.youtube.api_key().is_none());

        let settings = settings.with_api_key(Some(String::new()));
        assert!(settings.youtube.api_key().is_none());

        let settings = settings.with_api_key(Some("from-env-key".to_string()));
        assert_eq!(settings.youtube.api_key(), Some("from-env-key"));
    }

    #[test]
    fn test_save_and_load_round_trip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.port = 8080;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 8080);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.api_base_url, "https://www.googleapis.com/youtube/v3");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("AIzaSyExampleKey123"), "AIza...y123");
        assert_eq!(mask_secret("short"), "*****");

        let mut settings = Settings::default();
        settings.youtube.api_key = Some("AIzaSyExampleKey123".to_string());
        assert_eq!(
            settings.redacted().youtube.api_key.as_deref(),
            Some("AIza...y123")
        );
    }
}
