//! Direct lookup commands: video, search, channel, comments, transcript.

use crate::cli::output::format_duration;
use crate::cli::Output;
use crate::config::Settings;
use crate::operations::Operations;
use anyhow::Result;
use serde::Serialize;
use std::future::Future;

/// Run a lookup behind a spinner.
async fn with_spinner<T, F>(msg: &str, fut: F) -> Result<T>
where
    F: Future<Output = crate::Result<T>>,
{
    let spinner = Output::spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    Ok(result?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Show details of a video.
pub async fn run_video(url: &str, json: bool, settings: &Settings) -> Result<()> {
    let ops = Operations::new(settings)?;
    let video = with_spinner("Fetching video details...", ops.get_video_details(url)).await?;

    if json {
        return print_json(&video);
    }

    Output::header(&video.title);
    Output::kv("ID", &video.id);
    Output::kv("Channel", &format!("{} ({})", video.channel_title, video.channel_id));
    Output::kv("Published", &video.published_at);
    Output::kv("Duration", &format_duration(&video.duration));
    Output::kv("Views", &video.view_count);
    Output::kv("Likes", &video.like_count);
    Output::kv("Comments", &video.comment_count);
    if !video.tags.is_empty() {
        Output::kv("Tags", &video.tags.join(", "));
    }
    if !video.description.is_empty() {
        println!();
        println!("{}", video.description);
    }

    Ok(())
}

/// Search for videos.
pub async fn run_search(
    query: &str,
    max_results: Option<u32>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let ops = Operations::new(settings)?;
    let results = with_spinner(
        &format!("Searching for \"{}\"...", query),
        ops.search_videos(query, max_results),
    )
    .await?;

    if json {
        return print_json(&results);
    }

    if results.is_empty() {
        Output::info("No videos found.");
        return Ok(());
    }

    Output::header(&format!("Results for \"{}\"", query));
    for result in &results {
        Output::search_result(
            &result.title,
            &result.channel_title,
            &result.published_at,
            &result.url(),
        );
    }

    Ok(())
}

/// Show details of a channel.
pub async fn run_channel(channel: &str, json: bool, settings: &Settings) -> Result<()> {
    let ops = Operations::new(settings)?;
    let info = with_spinner("Fetching channel details...", ops.get_channel_details(channel)).await?;

    if json {
        return print_json(&info);
    }

    Output::header(&info.title);
    Output::kv("ID", &info.id);
    Output::kv("Custom URL", &info.custom_url);
    Output::kv("Created", &info.published_at);
    Output::kv("Country", &info.country);
    Output::kv("Subscribers", &info.subscriber_count);
    Output::kv("Videos", &info.video_count);
    Output::kv("Views", &info.view_count);
    if !info.description.is_empty() {
        println!();
        println!("{}", info.description);
    }

    Ok(())
}

/// List top-level comments of a video.
pub async fn run_comments(
    url: &str,
    max_results: Option<u32>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let ops = Operations::new(settings)?;
    let comments = with_spinner(
        "Fetching comments...",
        ops.get_video_comments(url, max_results),
    )
    .await?;

    if json {
        return print_json(&comments);
    }

    Output::header(&format!("{} comment(s)", comments.len()));
    for comment in &comments {
        Output::comment(
            &comment.author,
            comment.like_count,
            comment.reply_count,
            &comment.text,
        );
    }

    Ok(())
}

/// Print the caption transcript of a video.
pub async fn run_transcript(
    url: &str,
    language: Option<&str>,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let ops = Operations::new(settings)?;
    let transcript =
        with_spinner("Fetching transcript...", ops.get_transcript(url, language)).await?;

    if json {
        return print_json(&transcript);
    }

    if transcript.is_empty() {
        Output::warning(&format!(
            "No transcript content found for video {}",
            transcript.video_id
        ));
    } else {
        println!("{}", transcript.text);
    }

    Ok(())
}
