//! Error types for ytlens.

use thiserror::Error;

/// Library-level error type for ytlens operations.
#[derive(Error, Debug)]
pub enum YtError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not extract {kind} from input: {input:?}")]
    InvalidIdentifier { kind: &'static str, input: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YouTube API error (HTTP {status}): {body}")]
    UpstreamApi { status: u16, body: String },

    #[error("{0} not found or inaccessible")]
    NotFound(String),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<YtError>,
    },
}

impl YtError {
    /// Tag this error with the name of the operation it escaped from.
    pub fn in_operation(self, operation: &'static str) -> Self {
        match self {
            // Never double-wrap.
            YtError::Operation { .. } => self,
            other => YtError::Operation {
                operation,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any operation tag peeled off.
    pub fn root(&self) -> &YtError {
        match self {
            YtError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Name of the operation this error was tagged with, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            YtError::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Result type alias for ytlens operations.
pub type Result<T> = std::result::Result<T, YtError>;
