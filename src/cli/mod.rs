//! CLI module for ytlens.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytlens - YouTube lookup tools for AI assistants
///
/// Serves transcripts, video details, search, channel info and comments
/// as MCP tools, or runs them directly from the command line.
#[derive(Parser, Debug)]
#[command(name = "ytlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// YouTube Data API key (overrides the config file)
    #[arg(long, env = "YOUTUBE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print lookup results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server on stdio for AI assistant integration (Claude, etc.)
    Mcp,

    /// Start MCP server over HTTP
    Serve {
        /// Host to bind to (default: server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default: server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show details of a video
    Video {
        /// YouTube URL or video ID
        url: String,
    },

    /// Search for videos
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (1-25)
        #[arg(short = 'n', long)]
        max_results: Option<u32>,
    },

    /// Show details of a channel
    Channel {
        /// Channel URL, @handle, channel ID or username
        channel: String,
    },

    /// List top-level comments of a video
    Comments {
        /// YouTube URL or video ID
        url: String,

        /// Maximum number of comments (1-100)
        #[arg(short = 'n', long)]
        max_results: Option<u32>,
    },

    /// Print the caption transcript of a video
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Caption language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check API key and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (API key masked)
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
