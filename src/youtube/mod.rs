//! YouTube access: identifier parsing, the Data API client, response mapping
//! and caption scraping.

mod captions;
mod client;
pub mod identifier;
pub mod mappers;
mod models;

pub use captions::{CaptionSource, TimedTextScraper};
pub use client::ApiClient;
pub use identifier::{extract_channel_identifier, extract_video_id, ChannelIdentifier, VideoId};
pub use models::{
    CaptionFragment, ChannelInfo, Comment, SearchResult, Transcript, VideoDetails, HIDDEN,
    NOT_AVAILABLE,
};
