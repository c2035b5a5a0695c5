//! MCP (Model Context Protocol) server for Bear.
//!
//! Speaks JSON-RPC 2.0 over stdio and exposes the [`BearService`] operations
//! as thirteen tools. Reads return JSON documents describing notes and tags;
//! writes return `{success, message}` and are flagged `isError` when the
//! command could not be handed to Bear.
//!
//! # Usage
//!
//! ```no_run
//! use bear_domain::BearService;
//! use bear_mcp_server::McpServer;
//!
//! # async fn demo(service: BearService) -> bear_mcp_server::Result<()> {
//! let server = McpServer::new(service, "bear-mcp-server", "0.1.0");
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`BearService`]: bear_domain::BearService

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{McpError, Result};
pub use protocol::{
    CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION,
    ServerInfo, ToolContent, ToolInfo,
};
pub use server::McpServer;
pub use tools::{Tool, definitions};
pub use transport::{Frame, Framing, MAX_MESSAGE_BYTES, StdioTransport};
