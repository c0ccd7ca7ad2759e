//! Identifier parsing for videos and channels.
//!
//! Turns whatever the caller pasted (a URL, a bare ID, a handle, a legacy
//! username) into the canonical form the Data API expects.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Length of a YouTube video ID.
const VIDEO_ID_LEN: usize = 11;

/// Length of a `UC...` channel ID.
const CHANNEL_ID_LEN: usize = 24;

static RAW_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"));

/// One pattern per supported URL shape. Each captures exactly the 11-character ID
/// and refuses to match if the ID run continues past 11 characters.
static VIDEO_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtu\.be/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/embed/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/shorts/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/live/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        r"youtube\.com/v/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

static CHANNEL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/channel/([A-Za-z0-9_-]+)").expect("Invalid regex")
});

static HANDLE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/@([^/?#\s]+)").expect("Invalid regex"));

/// A validated 11-character video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a URL or bare ID. See [`extract_video_id`].
    pub fn parse(input: &str) -> Option<Self> {
        extract_video_id(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a channel was identified by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ChannelIdentifier {
    /// A `UC...` channel ID.
    Id(String),
    /// An `@handle`, stored with its leading `@`.
    Handle(String),
    /// A legacy username.
    Username(String),
}

impl ChannelIdentifier {
    /// Parse a channel URL, handle, ID or username. See [`extract_channel_identifier`].
    pub fn parse(input: &str) -> Option<Self> {
        extract_channel_identifier(input)
    }

    /// The Data API query parameter that selects a channel by this identifier.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            ChannelIdentifier::Id(id) => ("id", id),
            ChannelIdentifier::Handle(handle) => ("forHandle", handle),
            ChannelIdentifier::Username(name) => ("forUsername", name),
        }
    }

    pub fn value(&self) -> &str {
        self.query_param().1
    }
}

impl fmt::Display for ChannelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelIdentifier::Id(id) => write!(f, "channel {}", id),
            ChannelIdentifier::Handle(handle) => write!(f, "channel {}", handle),
            ChannelIdentifier::Username(name) => write!(f, "user {}", name),
        }
    }
}

/// Extract a video ID from a YouTube URL or bare ID.
///
/// A bare 11-character ID wins over every URL pattern. Supported URL shapes are
/// `watch?v=`, `youtu.be/`, `/embed/`, `/shorts/`, `/live/` and `/v/`. Anything
/// else (playlists, channel pages, other sites) yields `None`.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();

    if input.len() == VIDEO_ID_LEN && RAW_VIDEO_ID.is_match(input) {
        return Some(VideoId(input.to_string()));
    }

    VIDEO_URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

/// Extract a channel identifier from a URL, handle, channel ID or username.
///
/// Only empty input is rejected; an unrecognised string is taken to be a
/// legacy username.
pub fn extract_channel_identifier(input: &str) -> Option<ChannelIdentifier> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = CHANNEL_URL.captures(input) {
        return Some(ChannelIdentifier::Id(caps[1].to_string()));
    }

    if let Some(caps) = HANDLE_URL.captures(input) {
        return Some(ChannelIdentifier::Handle(format!("@{}", &caps[1])));
    }

    if input.starts_with('@') {
        return Some(ChannelIdentifier::Handle(input.to_string()));
    }

    if input.len() == CHANNEL_ID_LEN && input.starts_with("UC") {
        return Some(ChannelIdentifier::Id(input.to_string()));
    }

    Some(ChannelIdentifier::Username(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn video(input: &str) -> Option<String> {
        extract_video_id(input).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_extract_video_id_all_url_shapes() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
        ];

        for url in urls {
            assert_eq!(video(url).as_deref(), Some(ID), "failed for {}", url);
        }
    }

    #[test]
    fn test_extract_video_id_raw_id() {
        assert_eq!(video("dQw4w9WgXcQ").as_deref(), Some(ID));
        assert_eq!(video("  dQw4w9WgXcQ\n").as_deref(), Some(ID));
        assert_eq!(video("_NuH3D4SN-c").as_deref(), Some("_NuH3D4SN-c"));
    }

    #[test]
    fn test_extract_video_id_with_extra_query() {
        assert_eq!(
            video("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some(ID)
        );
        assert_eq!(
            video("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
        assert_eq!(
            video("https://youtu.be/dQw4w9WgXcQ?si=VSFea_rMwtaiR8Q7").as_deref(),
            Some(ID)
        );
        assert_eq!(video("m.youtube.com/shorts/dQw4w9WgXcQ").as_deref(), Some(ID));
    }

    #[test]
    fn test_extract_video_id_rejects_unsupported() {
        assert_eq!(video("https://example.com/not-youtube"), None);
        assert_eq!(
            video("https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"),
            None
        );
        assert_eq!(video("https://example.com/embed/dQw4w9WgXcQ"), None);
        assert_eq!(video("not-a-video-id"), None);
        assert_eq!(video(""), None);
        assert_eq!(video("   "), None);
    }

    #[test]
    fn test_extract_video_id_rejects_overlong_id() {
        assert_eq!(video("https://youtu.be/dQw4w9WgXcQXYZ"), None);
        assert_eq!(video("dQw4w9WgXcQX"), None);
    }

    #[test]
    fn test_video_id_watch_url() {
        let id = VideoId::parse(ID).unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.to_string(), ID);
    }

    #[test]
    fn test_extract_channel_handle() {
        assert_eq!(
            extract_channel_identifier("@mkbhd"),
            Some(ChannelIdentifier::Handle("@mkbhd".to_string()))
        );
        assert_eq!(
            extract_channel_identifier("https://www.youtube.com/@mkbhd/videos"),
            Some(ChannelIdentifier::Handle("@mkbhd".to_string()))
        );
    }

    #[test]
    fn test_extract_channel_handle_non_ascii() {
        assert_eq!(
            extract_channel_identifier("https://www.youtube.com/@café.music?si=abc"),
            Some(ChannelIdentifier::Handle("@café.music".to_string()))
        );
        assert_eq!(
            extract_channel_identifier("https://youtube.com/@日本語チャンネル/featured"),
            Some(ChannelIdentifier::Handle("@日本語チャンネル".to_string()))
        );
    }

    #[test]
    fn test_extract_channel_id() {
        let id = "UCBJycsmduvYEL83R_U4JriQ";
        assert_eq!(
            extract_channel_identifier(id),
            Some(ChannelIdentifier::Id(id.to_string()))
        );
        assert_eq!(
            extract_channel_identifier("https://youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ"),
            Some(ChannelIdentifier::Id(id.to_string()))
        );
    }

    #[test]
    fn test_extract_channel_username_fallback() {
        assert_eq!(
            extract_channel_identifier("  GoogleDevelopers "),
            Some(ChannelIdentifier::Username("GoogleDevelopers".to_string()))
        );
        // 24 characters but not a UC id.
        assert_eq!(
            extract_channel_identifier("XXBJycsmduvYEL83R_U4JriQ"),
            Some(ChannelIdentifier::Username("XXBJycsmduvYEL83R_U4JriQ".to_string()))
        );
    }

    #[test]
    fn test_extract_channel_empty_is_none() {
        assert_eq!(extract_channel_identifier(""), None);
        assert_eq!(extract_channel_identifier(" \t "), None);
    }

    #[test]
    fn test_channel_query_param() {
        assert_eq!(
            ChannelIdentifier::Id("UCx".to_string()).query_param(),
            ("id", "UCx")
        );
        assert_eq!(
            ChannelIdentifier::Handle("@mkbhd".to_string()).query_param(),
            ("forHandle", "@mkbhd")
        );
        assert_eq!(
            ChannelIdentifier::Username("google".to_string()).query_param(),
            ("forUsername", "google")
        );
    }

    #[test]
    fn test_channel_identifier_serializes_tagged() {
        let json = serde_json::to_value(ChannelIdentifier::Handle("@mkbhd".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "handle", "value": "@mkbhd"}));
    }
}
