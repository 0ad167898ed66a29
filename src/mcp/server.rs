// SPDX-License-Identifier: MIT

//! MCP server: request dispatch and the stdio serve loop.
//!
//! Adapter failures are returned as ordinary tool results carrying the
//! structured error payload; JSON-RPC error responses are reserved for
//! protocol-level problems (malformed JSON, unknown methods, bad params).

use crate::adapter::StravaAdapter;
use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::mcp::schema;
use serde_json::{json, Value};

/// MCP protocol revision implemented by this server.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server wrapping the activity-access adapter.
pub struct McpServer {
    adapter: StravaAdapter,
}

impl McpServer {
    pub fn new(adapter: StravaAdapter) -> Self {
        Self { adapter }
    }

    /// Handle a single request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Requests without an id are notifications and get no response.
        if request.id.is_none() {
            tracing::debug!(method = %request.method, "Ignoring notification");
            return None;
        }

        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": schema::tool_descriptors() }),
            ),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    async fn handle_tool_call(
        &self,
        id: Option<Value>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params");
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        tracing::info!(tool = name, "Handling tool call");

        match self.dispatch(name, &arguments).await {
            Some(payload) => JsonRpcResponse::success(id, tool_result(&payload)),
            None => {
                JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name))
            }
        }
    }

    /// Run the named tool against the adapter. Returns `None` for an
    /// unknown tool name.
    async fn dispatch(&self, name: &str, args: &Value) -> Option<Value> {
        let outcome = match name {
            schema::GET_AUTH_URL => self
                .adapter
                .authorization_url(u64_arg(args, "client_id"))
                .map(Value::String),
            schema::REFRESH_ACCESS_TOKEN => {
                self.adapter
                    .refresh_access_token(
                        &string_arg(args, "refresh_token"),
                        u64_arg(args, "client_id"),
                        optional_string_arg(args, "client_secret"),
                    )
                    .await
            }
            schema::EXCHANGE_CODE_FOR_ACTIVITIES => {
                self.adapter
                    .exchange_code_for_activities(
                        &string_arg(args, "code"),
                        u64_arg(args, "client_id"),
                        optional_string_arg(args, "client_secret"),
                    )
                    .await
            }
            schema::FETCH_ACTIVITIES_WITH_TOKEN => {
                self.adapter
                    .fetch_activities_with_token(&string_arg(args, "access_token"))
                    .await
            }
            schema::SAVE_TOKENS => {
                let tokens = args.get("tokens").cloned().unwrap_or(Value::Null);
                self.adapter.persist_tokens(&tokens)
            }
            schema::LOAD_TOKENS => self.adapter.load_tokens(),
            _ => return None,
        };

        Some(match outcome {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(tool = name, error = %e, "Tool returned an error payload");
                e.to_value()
            }
        })
    }

    /// Run the server over stdin/stdout, one JSON-RPC message per line.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        tracing::info!("MCP stdio transport ready - listening on stdin/stdout");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        while reader.read_line(&mut line).await? > 0 {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                line.clear();
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                )),
            };

            if let Some(response) = response {
                let serialized = serde_json::to_string(&response)?;
                stdout.write_all(serialized.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            line.clear();
        }

        tracing::info!("MCP stdio transport ended");
        Ok(())
    }
}

/// `initialize` result: protocol version, capabilities, server identity.
fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

/// Wrap a payload as MCP tool-call content. String payloads (the
/// authorization URL) go out as-is; everything else is serialized JSON.
fn tool_result(payload: &Value) -> Value {
    let text = match payload {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn string_arg(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u64_arg(args: &Value, key: &str) -> Option<u64> {
    args.get(key).and_then(Value::as_u64)
}
