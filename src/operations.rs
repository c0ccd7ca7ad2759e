//! The five lookup operations exposed to tool callers.
//!
//! Each operation runs parse → validate → fetch → map and tags any failure
//! with its own name. Nothing is shared between calls except read-only
//! configuration, so an `Operations` can serve concurrent requests.

use crate::config::{Settings, TranscriptSettings, YoutubeSettings};
use crate::error::{Result, YtError};
use crate::youtube::{
    mappers, ApiClient, CaptionSource, ChannelIdentifier, ChannelInfo, Comment, SearchResult,
    TimedTextScraper, Transcript, VideoDetails, VideoId,
};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const GET_TRANSCRIPT: &str = "get_transcript";
pub const GET_VIDEO_DETAILS: &str = "get_video_details";
pub const SEARCH_VIDEOS: &str = "search_videos";
pub const GET_CHANNEL_DETAILS: &str = "get_channel_details";
pub const GET_VIDEO_COMMENTS: &str = "get_video_comments";

/// Names of every operation, in the order they are advertised.
pub const OPERATION_NAMES: [&str; 5] = [
    GET_TRANSCRIPT,
    GET_VIDEO_DETAILS,
    SEARCH_VIDEOS,
    GET_CHANNEL_DETAILS,
    GET_VIDEO_COMMENTS,
];

/// Accepted `maxResults` for video search.
pub const SEARCH_RESULTS_RANGE: RangeInclusive<u32> = 1..=25;

/// Accepted `maxResults` for comment threads.
pub const COMMENT_RESULTS_RANGE: RangeInclusive<u32> = 1..=100;

/// Entry point for all lookups.
pub struct Operations {
    youtube: YoutubeSettings,
    transcript: TranscriptSettings,
    api: Option<ApiClient>,
    captions: Arc<dyn CaptionSource>,
}

impl Operations {
    /// Build the operations from settings. The API client is only created
    /// when an API key is configured; transcripts work without one.
    pub fn new(settings: &Settings) -> Result<Self> {
        let api = settings
            .youtube
            .api_key()
            .map(|key| ApiClient::new(&settings.youtube.api_base_url, key))
            .transpose()?;

        if api.is_none() {
            info!("No YouTube API key configured; only transcripts are available");
        }

        let captions = Arc::new(TimedTextScraper::new(&settings.transcript.watch_base_url)?);
        Ok(Self::with_components(settings, api, captions))
    }

    /// Build the operations with explicit collaborators.
    pub fn with_components(
        settings: &Settings,
        api: Option<ApiClient>,
        captions: Arc<dyn CaptionSource>,
    ) -> Self {
        Self {
            youtube: settings.youtube.clone(),
            transcript: settings.transcript.clone(),
            api,
            captions,
        }
    }

    /// Whether operations that need the Data API can run.
    pub fn has_api_key(&self) -> bool {
        self.api.is_some()
    }

    fn api(&self) -> Result<&ApiClient> {
        self.api.as_ref().ok_or_else(|| {
            YtError::Config(
                "YouTube API key not set. Set YOUTUBE_API_KEY or youtube.api_key in the config file"
                    .to_string(),
            )
        })
    }

    /// Caption text of a video joined into a single string.
    #[instrument(skip(self))]
    pub async fn get_transcript(&self, url: &str, language: Option<&str>) -> Result<Transcript> {
        self.fetch_transcript(url, language)
            .await
            .map_err(|e| e.in_operation(GET_TRANSCRIPT))
    }

    /// Metadata, statistics and tags of a single video.
    #[instrument(skip(self))]
    pub async fn get_video_details(&self, url: &str) -> Result<VideoDetails> {
        self.video_details(url)
            .await
            .map_err(|e| e.in_operation(GET_VIDEO_DETAILS))
    }

    /// One page of videos matching `query`.
    #[instrument(skip(self))]
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<SearchResult>> {
        self.search(query, max_results)
            .await
            .map_err(|e| e.in_operation(SEARCH_VIDEOS))
    }

    /// Profile and statistics of a channel given by URL, handle, ID or username.
    #[instrument(skip(self))]
    pub async fn get_channel_details(&self, channel: &str) -> Result<ChannelInfo> {
        self.channel_details(channel)
            .await
            .map_err(|e| e.in_operation(GET_CHANNEL_DETAILS))
    }

    /// Top-level comments of a video.
    #[instrument(skip(self))]
    pub async fn get_video_comments(
        &self,
        url: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<Comment>> {
        self.video_comments(url, max_results)
            .await
            .map_err(|e| e.in_operation(GET_VIDEO_COMMENTS))
    }

    async fn fetch_transcript(&self, url: &str, language: Option<&str>) -> Result<Transcript> {
        let video_id = parse_video_id(url)?;
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.transcript.default_language.as_str());

        let fragments = self.captions.fetch_captions(&video_id, language).await?;
        debug!("Fetched {} caption fragments", fragments.len());

        Ok(Transcript::from_fragments(
            video_id.as_str(),
            language,
            &fragments,
        ))
    }

    async fn video_details(&self, url: &str) -> Result<VideoDetails> {
        let video_id = parse_video_id(url)?;
        let params = [
            ("part", "snippet,statistics,contentDetails".to_string()),
            ("id", video_id.to_string()),
        ];

        let response = self.api()?.fetch_endpoint("videos", &params).await?;
        mappers::map_video_details(&response)
    }

    async fn search(&self, query: &str, max_results: Option<u32>) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(YtError::InvalidInput("query must not be empty".to_string()));
        }

        let max_results = check_range(
            "maxResults",
            max_results.unwrap_or(self.youtube.search_max_results),
            &SEARCH_RESULTS_RANGE,
        )?;

        let params = [
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("maxResults", max_results.to_string()),
        ];

        let response = self.api()?.fetch_endpoint("search", &params).await?;
        mappers::map_search_results(&response)
    }

    async fn channel_details(&self, channel: &str) -> Result<ChannelInfo> {
        let identifier =
            ChannelIdentifier::parse(channel).ok_or_else(|| YtError::InvalidIdentifier {
                kind: "channel identifier",
                input: channel.to_string(),
            })?;
        debug!("Resolved {}", identifier);

        let (selector, value) = identifier.query_param();
        let params = [
            ("part", "snippet,statistics".to_string()),
            (selector, value.to_string()),
        ];

        let response = self.api()?.fetch_endpoint("channels", &params).await?;
        mappers::map_channel_info(&response)
    }

    async fn video_comments(&self, url: &str, max_results: Option<u32>) -> Result<Vec<Comment>> {
        let video_id = parse_video_id(url)?;
        let max_results = check_range(
            "maxResults",
            max_results.unwrap_or(self.youtube.comment_max_results),
            &COMMENT_RESULTS_RANGE,
        )?;

        let params = [
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", max_results.to_string()),
            ("order", self.youtube.comment_order.clone()),
            ("textFormat", "plainText".to_string()),
        ];

        let response = self.api()?.fetch_endpoint("commentThreads", &params).await?;
        mappers::map_comments(&response)
    }
}

fn parse_video_id(input: &str) -> Result<VideoId> {
    VideoId::parse(input).ok_or_else(|| YtError::InvalidIdentifier {
        kind: "video ID",
        input: input.to_string(),
    })
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<u32> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(YtError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}
