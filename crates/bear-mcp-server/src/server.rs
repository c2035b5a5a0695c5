//! Request handling and the stdio serve loop.

use bear_domain::{ActionReceipt, BearService, DomainError, OperationResult};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{debug, info, warn};

use crate::error::{McpError, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, MCP_PROTOCOL_VERSION, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use crate::tools::{
    AppendArgs, CreateNoteArgs, DeleteTagArgs, IdentifierArgs, NoteActionArgs, NoteView,
    RecentArgs, SearchArgs, TagArgs, Tool, UpdateNoteArgs, definitions, note_list,
};
use crate::transport::StdioTransport;

/// MCP server answering tool calls from a [`BearService`].
#[derive(Debug, Clone)]
pub struct McpServer {
    service: BearService,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(service: BearService, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service,
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }

    pub fn service(&self) -> &BearService {
        &self.service
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Serve framed messages from `reader`, replying on `writer`, until end of input.
    ///
    /// Unreadable input gets a parse error reply. Only I/O failures end the loop early.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(name = %self.info.name, version = %self.info.version, "MCP server listening on stdio");
        let mut transport = StdioTransport::new(reader, writer);

        loop {
            let frame = match transport.read_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(McpError::Protocol(detail)) => {
                    warn!(%detail, "unreadable input");
                    let reply =
                        JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(&detail));
                    let body = serde_json::to_string(&reply)?;
                    transport.write_frame(&body, transport.framing()).await?;
                    continue;
                }
                Err(e) => return Err(e),
            };
            if let Some(reply) = self.handle_message(&frame.body).await {
                let body = serde_json::to_string(&reply)?;
                transport.write_frame(&body, frame.framing).await?;
            }
        }

        info!("stdin closed, shutting down");
        self.service.close();
        Ok(())
    }

    /// Handle one raw message. Returns the reply, or `None` for notifications.
    pub async fn handle_message(&self, body: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request(e),
            )),
        }
    }

    /// Handle a decoded request or notification.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, id = ?request.id, "request");

        let Some(id) = request.id else {
            // Notifications (`notifications/initialized`, cancellations) need no reply.
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!(ListToolsResult {
                tools: definitions()
            })),
            "tools/call" => match parse_params::<CallToolParams>(request.params) {
                Ok(params) => Ok(json!(self.call_tool(&params.name, params.arguments).await)),
                Err(e) => Err(e),
            },
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self) -> Value {
        json!(InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: self.info.clone(),
        })
    }

    /// Run a tool. Failures come back as `isError` results, never as protocol errors.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        let Some(tool) = Tool::from_name(name) else {
            return CallToolResult::error(format!("Unknown tool: {name}"));
        };
        let arguments = arguments.unwrap_or_else(|| json!({}));

        match self.run_tool(tool, arguments).await {
            Ok(result) => result,
            Err(ToolFailure::Arguments(e)) => {
                CallToolResult::error(format!("Invalid arguments for {name}: {e}"))
            }
            Err(ToolFailure::Domain(e)) => {
                warn!(tool = name, error = %e, "tool call failed");
                CallToolResult::error(e.to_string())
            }
        }
    }

    async fn run_tool(
        &self,
        tool: Tool,
        arguments: Value,
    ) -> std::result::Result<CallToolResult, ToolFailure> {
        let service = &self.service;
        let result = match tool {
            Tool::CreateNote => {
                let args: CreateNoteArgs = parse_args(arguments)?;
                action(service.create_note(args.into()).await?)
            }
            Tool::UpdateNote => {
                let args: UpdateNoteArgs = parse_args(arguments)?;
                action(service.update_note(args.into()).await?)
            }
            Tool::AppendToNote => {
                let args: AppendArgs = parse_args(arguments)?;
                action(service.append_to_note(args.into()).await?)
            }
            Tool::OpenNote => {
                let args: IdentifierArgs = parse_args(arguments)?;
                action(service.open_note(&args.identifier).await?)
            }
            Tool::TrashNote => {
                let args: NoteActionArgs = parse_args(arguments)?;
                action(service.trash_note(args.into()).await?)
            }
            Tool::ArchiveNote => {
                let args: NoteActionArgs = parse_args(arguments)?;
                action(service.archive_note(args.into()).await?)
            }
            Tool::DeleteTag => {
                let args: DeleteTagArgs = parse_args(arguments)?;
                action(service.delete_tag(args.into()).await?)
            }
            Tool::SearchNotes => {
                let args: SearchArgs = parse_args(arguments)?;
                let notes = service.search_notes(&args.query, args.limit).await?;
                json_text(note_list(
                    &notes.data.unwrap_or_default(),
                    "query",
                    json!(args.query),
                ))
            }
            Tool::GetNote => {
                let args: IdentifierArgs = parse_args(arguments)?;
                let note = service.get_note(&args.identifier).await?.data.flatten();
                json_text(match &note {
                    Some(note) => json!({"found": true, "note": NoteView::from(note)}),
                    None => json!({"found": false, "identifier": args.identifier}),
                })
            }
            Tool::GetNotesByTag => {
                let args: TagArgs = parse_args(arguments)?;
                let notes = service.get_notes_by_tag(&args.tag, args.limit).await?;
                json_text(note_list(
                    &notes.data.unwrap_or_default(),
                    "tag",
                    json!(args.tag),
                ))
            }
            Tool::GetRecentNotes => {
                let args: RecentArgs = parse_args(arguments)?;
                let notes = service.get_recent_notes(args.days, args.limit).await?;
                json_text(note_list(
                    &notes.data.unwrap_or_default(),
                    "days",
                    json!(args.days),
                ))
            }
            Tool::GetNoteBacklinks => {
                let args: IdentifierArgs = parse_args(arguments)?;
                let notes = service.get_backlinks(&args.identifier).await?;
                json_text(note_list(
                    &notes.data.unwrap_or_default(),
                    "targetNote",
                    json!(args.identifier),
                ))
            }
            Tool::ListTags => {
                let tags = service.list_tags().await?.data.unwrap_or_default();
                let titles: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();
                json_text(json!({"count": titles.len(), "tags": titles}))
            }
        };
        Ok(result)
    }
}

enum ToolFailure {
    Arguments(serde_json::Error),
    Domain(DomainError),
}

impl From<serde_json::Error> for ToolFailure {
    fn from(e: serde_json::Error) -> Self {
        Self::Arguments(e)
    }
}

impl From<DomainError> for ToolFailure {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> std::result::Result<T, serde_json::Error> {
    serde_json::from_value(arguments)
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> std::result::Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
    serde_json::from_value(params).map_err(JsonRpcError::invalid_params)
}

fn json_text(value: Value) -> CallToolResult {
    CallToolResult::text(value.to_string())
}

/// `{success, message}` text, flagged as an error when the dispatch failed.
fn action(result: OperationResult<ActionReceipt>) -> CallToolResult {
    match (result.data, result.error) {
        (Some(receipt), _) if result.success => {
            json_text(json!({"success": true, "message": receipt.message}))
        }
        (_, error) => CallToolResult::error(
            json!({
                "success": false,
                "message": error.unwrap_or_else(|| "unknown error".to_string()),
            })
            .to_string(),
        ),
    }
}
