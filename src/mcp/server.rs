//! MCP server implementation.

use super::protocol::*;
use super::tools::{get_tools, ChannelArgs, CommentsArgs, SearchArgs, TranscriptArgs, VideoArgs};
use crate::error::YtError;
use crate::operations::{
    Operations, GET_CHANNEL_DETAILS, GET_TRANSCRIPT, GET_VIDEO_COMMENTS, GET_VIDEO_DETAILS,
    SEARCH_VIDEOS,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "ytlens";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for ytlens.
///
/// Holds no per-session state, so one instance can serve stdio and any
/// number of concurrent HTTP requests.
pub struct McpServer {
    operations: Operations,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(operations: Operations) -> Self {
        Self { operations }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("ytlens MCP server starting on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("JSON-RPC method {}", request.method);

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                "Unsupported jsonrpc version",
            ));
        }

        if request.is_notification() {
            // Notifications (e.g. notifications/initialized) get no reply.
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        if let Some(client) = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .and_then(|p| p.client_info)
        {
            info!("Client connected: {} {}", client.name, client.version);
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_result(id, &ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = self.call_tool(&params.name, params.arguments).await;
        JsonRpcResponse::from_result(id, &result)
    }

    /// Run a tool by name. Every failure becomes an `isError` result.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let arguments = arguments.unwrap_or_else(|| json!({}));
        let ops = &self.operations;

        match name {
            GET_TRANSCRIPT => match parse_args::<TranscriptArgs>(name, arguments) {
                Ok(args) => transcript_result(
                    ops.get_transcript(&args.url, args.language.as_deref()).await,
                ),
                Err(e) => e,
            },
            GET_VIDEO_DETAILS => match parse_args::<VideoArgs>(name, arguments) {
                Ok(args) => json_result(ops.get_video_details(&args.url).await),
                Err(e) => e,
            },
            SEARCH_VIDEOS => match parse_args::<SearchArgs>(name, arguments) {
                Ok(args) => json_result(ops.search_videos(&args.query, args.max_results).await),
                Err(e) => e,
            },
            GET_CHANNEL_DETAILS => match parse_args::<ChannelArgs>(name, arguments) {
                Ok(args) => json_result(ops.get_channel_details(&args.channel).await),
                Err(e) => e,
            },
            GET_VIDEO_COMMENTS => match parse_args::<CommentsArgs>(name, arguments) {
                Ok(args) => {
                    json_result(ops.get_video_comments(&args.url, args.max_results).await)
                }
                Err(e) => e,
            },
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolCallResult> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolCallResult::error(format!("Invalid arguments for {}: {}", tool, e)))
}

fn error_result(err: &YtError) -> ToolCallResult {
    warn!("{}", err);
    ToolCallResult::error(format!("Error: {}", err))
}

/// Pretty JSON on success, error payload otherwise.
fn json_result<T: Serialize>(result: crate::error::Result<T>) -> ToolCallResult {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => ToolCallResult::error(format!("Error: failed to serialize result: {}", e)),
        },
        Err(e) => error_result(&e),
    }
}

fn transcript_result(result: crate::error::Result<crate::youtube::Transcript>) -> ToolCallResult {
    match result {
        Ok(transcript) if transcript.is_empty() => ToolCallResult::text(format!(
            "No transcript content found for video {}",
            transcript.video_id
        )),
        Ok(transcript) => ToolCallResult::text(transcript.text),
        Err(e) => error_result(&e),
    }
}
