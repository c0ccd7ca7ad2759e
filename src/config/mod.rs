//! Configuration module for ytlens.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    mask_secret, GeneralSettings, ServerSettings, Settings, TranscriptSettings, YoutubeSettings,
};
