//! HTTP transport for the MCP server.
//!
//! Exposes the same JSON-RPC handler as stdio at `POST /mcp`, plus a
//! descriptor at `/` and `/health`.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::{get_tools, McpServer, SERVER_NAME, SERVER_VERSION};
use crate::operations::Operations;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
struct AppState {
    server: McpServer,
}

/// Run the HTTP server.
pub async fn run_serve(host: &str, port: u16, settings: &Settings) -> anyhow::Result<()> {
    let operations = Operations::new(settings)?;
    let app = router(McpServer::new(operations));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    Output::header("ytlens MCP Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Descriptor", "GET  / and /health");
    Output::kv("JSON-RPC", "POST /mcp");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router around an MCP server.
fn router(server: McpServer) -> Router {
    let state = Arc::new(AppState { server });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(descriptor))
        .route("/health", get(descriptor))
        .route("/mcp", post(mcp))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct Descriptor {
    name: &'static str,
    version: &'static str,
    status: &'static str,
    tools: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn descriptor() -> impl IntoResponse {
    Json(Descriptor {
        name: SERVER_NAME,
        version: SERVER_VERSION,
        status: "ok",
        tools: get_tools().into_iter().map(|t| t.name).collect(),
    })
}

async fn mcp(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    match state.server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
