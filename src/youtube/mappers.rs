//! Projection of raw Data API responses into result records.
//!
//! Every optional upstream field is coalesced on its own, so a response that
//! omits one statistic never blanks out its neighbours.

use super::models::{ChannelInfo, Comment, SearchResult, VideoDetails, HIDDEN, NOT_AVAILABLE};
use crate::error::{Result, YtError};
use serde::Deserialize;
use serde_json::Value;

/// First element of `items`, or `NotFound` if the list is missing or empty.
fn first_item<'a>(response: &'a Value, what: &str) -> Result<&'a Value> {
    items(response, what)?
        .first()
        .ok_or_else(|| YtError::NotFound(what.to_string()))
}

/// Non-empty `items` array, or `NotFound`.
fn items<'a>(response: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    match response.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => Ok(items),
        _ => Err(YtError::NotFound(what.to_string())),
    }
}

/// String value of a field, accepting numbers as well, or `default`.
fn text_or(value: &Value, default: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => default.to_string(),
    }
}

fn text(value: &Value) -> String {
    text_or(value, "")
}

/// Best available thumbnail: high, then medium, then default.
fn thumbnail_url(snippet: &Value) -> String {
    let thumbnails = &snippet["thumbnails"];
    ["high", "medium", "default"]
        .iter()
        .find_map(|size| thumbnails[*size]["url"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// Map a `videos` response to the details of its first video.
pub fn map_video_details(response: &Value) -> Result<VideoDetails> {
    let item = first_item(response, "Video")?;
    let snippet = &item["snippet"];
    let statistics = &item["statistics"];

    let tags = snippet["tags"]
        .as_array()
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(VideoDetails {
        id: text(&item["id"]),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        channel_id: text(&snippet["channelId"]),
        channel_title: text(&snippet["channelTitle"]),
        published_at: text(&snippet["publishedAt"]),
        duration: text(&item["contentDetails"]["duration"]),
        view_count: text_or(&statistics["viewCount"], NOT_AVAILABLE),
        like_count: text_or(&statistics["likeCount"], NOT_AVAILABLE),
        comment_count: text_or(&statistics["commentCount"], NOT_AVAILABLE),
        tags,
        thumbnail_url: thumbnail_url(snippet),
    })
}

/// Map a `search` response to one result per item.
pub fn map_search_results(response: &Value) -> Result<Vec<SearchResult>> {
    let items = items(response, "Search results")?;

    Ok(items
        .iter()
        .map(|item| {
            let snippet = &item["snippet"];
            SearchResult {
                video_id: text(&item["id"]["videoId"]),
                title: text(&snippet["title"]),
                description: text(&snippet["description"]),
                channel_title: text(&snippet["channelTitle"]),
                published_at: text(&snippet["publishedAt"]),
                thumbnail_url: thumbnail_url(snippet),
            }
        })
        .collect())
}

/// Map a `channels` response to the info of its first channel.
pub fn map_channel_info(response: &Value) -> Result<ChannelInfo> {
    let item = first_item(response, "Channel")?;
    let snippet = &item["snippet"];
    let statistics = &item["statistics"];

    // hiddenSubscriberCount=true comes with no subscriberCount at all.
    let subscriber_count = text_or(&statistics["subscriberCount"], HIDDEN);

    Ok(ChannelInfo {
        id: text(&item["id"]),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        custom_url: text(&snippet["customUrl"]),
        published_at: text(&snippet["publishedAt"]),
        thumbnail_url: thumbnail_url(snippet),
        subscriber_count,
        video_count: text_or(&statistics["videoCount"], "0"),
        view_count: text_or(&statistics["viewCount"], "0"),
        country: text_or(&snippet["country"], NOT_AVAILABLE),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
    total_reply_count: u64,
}

#[derive(Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: String,
    text_display: String,
    like_count: u64,
    published_at: String,
}

/// Map a `commentThreads` response to its top-level comments.
///
/// Unlike the other mappers nothing here is optional: a thread without its
/// top-level comment is a malformed response and fails the whole mapping.
pub fn map_comments(response: &Value) -> Result<Vec<Comment>> {
    let items = items(response, "Comments")?;

    items
        .iter()
        .map(|item| -> Result<Comment> {
            let thread = CommentThread::deserialize(item)?;
            let snippet = thread.snippet.top_level_comment.snippet;
            Ok(Comment {
                author: snippet.author_display_name,
                text: snippet.text_display,
                like_count: snippet.like_count,
                published_at: snippet.published_at,
                reply_count: thread.snippet.total_reply_count,
            })
        })
        .collect()
}
