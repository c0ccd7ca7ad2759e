//! ytlens - YouTube lookup tools for AI assistants
//!
//! Exposes a small set of read-only YouTube lookups as callable tools over
//! the Model Context Protocol, plus a CLI for running them by hand.
//!
//! # Overview
//!
//! ytlens can:
//! - Fetch the caption transcript of a video (no API key needed)
//! - Look up video details, search results, channel profiles and comments
//!   through the YouTube Data API v3
//! - Serve all of the above as MCP tools over stdio or HTTP
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `youtube` - Identifier parsing, Data API client, response mappers, captions
//! - `operations` - The five lookup operations
//! - `mcp` - JSON-RPC / MCP server
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use ytlens::config::Settings;
//! use ytlens::operations::Operations;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let ops = Operations::new(&settings)?;
//!
//!     let video = ops.get_video_details("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{} by {}", video.title, video.channel_title);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod operations;
pub mod youtube;

pub use error::{Result, YtError};
