//! MCP (Model Context Protocol) server for ytlens.
//!
//! Exposes the lookup operations as tools to AI assistants.
//! Implements JSON-RPC 2.0 over stdio; the HTTP server reuses the same handler.

mod protocol;
mod server;
mod tools;

pub use protocol::{JsonRpcRequest, JsonRpcResponse, ToolCallResult, ToolContent};
pub use server::{McpServer, SERVER_NAME, SERVER_VERSION};
pub use tools::get_tools;
