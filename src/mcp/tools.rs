//! MCP tool definitions and argument types.

use super::protocol::Tool;
use crate::operations::{
    COMMENT_RESULTS_RANGE, GET_CHANNEL_DETAILS, GET_TRANSCRIPT, GET_VIDEO_COMMENTS,
    GET_VIDEO_DETAILS, SEARCH_RESULTS_RANGE, SEARCH_VIDEOS,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TranscriptArgs {
    pub url: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoArgs {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelArgs {
    pub channel: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsArgs {
    pub url: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_TRANSCRIPT.to_string(),
            description: "Get the caption transcript of a YouTube video as plain text. \
                Works with any video URL or ID; no API key needed."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "YouTube video URL or 11-character video ID"
                    },
                    "language": {
                        "type": "string",
                        "description": "Caption language code",
                        "default": "en"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: GET_VIDEO_DETAILS.to_string(),
            description: "Get title, description, channel, duration, statistics and tags \
                of a YouTube video."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "YouTube video URL or 11-character video ID"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: SEARCH_VIDEOS.to_string(),
            description: "Search YouTube for videos matching a query.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "maxResults": {
                        "type": "integer",
                        "description": "Maximum number of results",
                        "minimum": SEARCH_RESULTS_RANGE.start(),
                        "maximum": SEARCH_RESULTS_RANGE.end(),
                        "default": 5
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: GET_CHANNEL_DETAILS.to_string(),
            description: "Get profile and statistics of a YouTube channel.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channel": {
                        "type": "string",
                        "description": "Channel URL, @handle, channel ID (UC...) or legacy username"
                    }
                },
                "required": ["channel"]
            }),
        },
        Tool {
            name: GET_VIDEO_COMMENTS.to_string(),
            description: "Get top-level comments of a YouTube video.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "YouTube video URL or 11-character video ID"
                    },
                    "maxResults": {
                        "type": "integer",
                        "description": "Maximum number of comments",
                        "minimum": COMMENT_RESULTS_RANGE.start(),
                        "maximum": COMMENT_RESULTS_RANGE.end(),
                        "default": 20
                    }
                },
                "required": ["url"]
            }),
        },
    ]
}
