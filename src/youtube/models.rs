//! Result records handed back to callers.

use serde::{Deserialize, Serialize};

/// Placeholder for a statistic the API did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a subscriber count the channel owner has hidden.
pub const HIDDEN: &str = "hidden";

/// Metadata and statistics for a single video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    /// ISO 8601 duration, e.g. `PT4M13S`.
    pub duration: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub tags: Vec<String>,
    pub thumbnail_url: String,
}

/// One hit from a video search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail_url: String,
}

impl SearchResult {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Public profile and statistics of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub published_at: String,
    pub thumbnail_url: String,
    pub subscriber_count: String,
    pub video_count: String,
    pub view_count: String,
    pub country: String,
}

/// A top-level comment on a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
    pub reply_count: u64,
}

/// A single timed caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    pub duration: f64,
}

/// Caption text for a video, flattened to one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub fragment_count: usize,
    pub text: String,
}

impl Transcript {
    /// Join caption fragments with single spaces, skipping blank ones.
    pub fn from_fragments(video_id: &str, language: &str, fragments: &[CaptionFragment]) -> Self {
        let parts: Vec<&str> = fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            video_id: video_id.to_string(),
            language: language.to_string(),
            fragment_count: parts.len(),
            text: parts.join(" "),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
