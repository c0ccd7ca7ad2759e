//! ytlens CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytlens::cli::{commands, Cli, Commands};
use ytlens::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    }
    .with_api_key(cli.api_key.clone());

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries MCP responses, so logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytlens={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Mcp => {
            commands::run_mcp(&settings).await?;
        }

        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| settings.server.host.clone());
            let port = port.unwrap_or(settings.server.port);
            commands::run_serve(&host, port, &settings).await?;
        }

        Commands::Video { url } => {
            commands::run_video(url, cli.json, &settings).await?;
        }

        Commands::Search { query, max_results } => {
            commands::run_search(query, *max_results, cli.json, &settings).await?;
        }

        Commands::Channel { channel } => {
            commands::run_channel(channel, cli.json, &settings).await?;
        }

        Commands::Comments { url, max_results } => {
            commands::run_comments(url, *max_results, cli.json, &settings).await?;
        }

        Commands::Transcript { url, language } => {
            commands::run_transcript(url, language.as_deref(), cli.json, &settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
