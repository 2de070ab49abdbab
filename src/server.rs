//! Scoring tool server: stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! Speaks the Model Context Protocol tool subset over stdin/stdout so the
//! scorers can be driven by any MCP client or a plain line-oriented script.
//!
//! Protocol flow:
//! 1. Client sends `initialize` → server responds with capabilities
//! 2. Client sends `notifications/initialized`
//! 3. Client sends `tools/list` → server returns the scoring tools
//! 4. Client sends `tools/call` → server scores and returns the result
//! 5. Client closes stdin → server exits

use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ScoreConfig;
use crate::tools::ToolRouter;

/// Maximum size of a single JSON-RPC line (10 MiB).
const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 types
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// MCP protocol types
// ---------------------------------------------------------------------------

/// MCP server info returned in initialize response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfo {
    name: String,
    version: String,
}

/// MCP server capabilities.
#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsCapability {
    list_changed: bool,
}

/// MCP initialize result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    protocol_version: String,
    capabilities: ServerCapabilities,
    server_info: ServerInfo,
}

/// MCP tool definition for tools/list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// MCP tools/list result.
#[derive(Debug, Serialize)]
struct ToolsListResult {
    tools: Vec<ToolDefinition>,
}

/// MCP tools/call params.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

/// MCP content item in tools/call response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tools/call result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Successful result carrying one text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
            is_error: false,
        }
    }

    /// Error result shown to the client; the call itself still succeeds.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ContentItem::text(format!("Error: {message}"))],
            is_error: true,
        }
    }
}

impl ContentItem {
    fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_owned(),
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Server main loop
// ---------------------------------------------------------------------------

/// Run the scoring server on stdin/stdout.
///
/// Reads JSON-RPC 2.0 requests line-by-line from stdin, dispatches to
/// the tool router, and writes responses to stdout. Exits when stdin
/// is closed.
///
/// # Errors
///
/// Returns an error if stdin/stdout I/O fails fatally.
pub fn run_server(config: &ScoreConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let reader = std::io::BufReader::new(stdin.lock());
    let stdout = std::io::stdout().lock();
    serve(config, reader, stdout)
}

/// Serve requests from `reader` until EOF, writing responses to `out`.
///
/// # Errors
///
/// Returns an error if reading or writing fails fatally.
pub fn serve(config: &ScoreConfig, mut reader: impl BufRead, mut out: impl Write) -> Result<()> {
    info!(
        lcs_strategy = ?config.lcs_strategy,
        parallel = config.parallel,
        "ocr-score server starting"
    );

    let router = ToolRouter::new(config);
    let mut line_buf = String::new();

    loop {
        line_buf.clear();
        let bytes_read = read_line_limited(&mut reader, &mut line_buf, MAX_LINE_BYTES)
            .context("failed to read request line")?;

        if bytes_read == 0 {
            info!("input closed, shutting down");
            break;
        }

        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(raw = trimmed, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                let resp = JsonRpcResponse::failure(None, PARSE_ERROR, format!("parse error: {e}"));
                write_response(&mut out, &resp)?;
                continue;
            }
        };

        // "jsonrpc" MUST be exactly "2.0".
        if request.jsonrpc != "2.0" {
            warn!(version = request.jsonrpc, "unsupported JSON-RPC version");
            let resp = JsonRpcResponse::failure(
                request.id.clone(),
                INVALID_REQUEST,
                format!("invalid request: jsonrpc must be \"2.0\", got {:?}", request.jsonrpc),
            );
            write_response(&mut out, &resp)?;
            continue;
        }

        // Notifications (no id) don't require a response.
        let is_notification = request.id.is_none();
        let response = dispatch(&router, &request);

        if is_notification {
            // Notifications MUST NOT receive a response.
            debug!(method = request.method, "notification handled (no response)");
            continue;
        }

        if let Some(resp) = response {
            write_response(&mut out, &resp)?;
        }
    }

    info!("ocr-score server stopped");
    Ok(())
}

/// Route a request to its handler. Notifications yield `None`.
fn dispatch(router: &ToolRouter, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = req.id.clone();
    let response = match req.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, &initialize_result()),
        "notifications/initialized" => {
            info!("client initialized");
            return None;
        }
        "tools/list" => JsonRpcResponse::success(
            id,
            &ToolsListResult {
                tools: router.list_tools(),
            },
        ),
        "tools/call" => call_tool(router, req),
        "ping" => JsonRpcResponse::success(id, &serde_json::json!({})),
        method => {
            warn!(method, "unknown method");
            JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("method not found: {method}"))
        }
    };
    Some(response)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: "2025-06-18".to_owned(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: "ocr-score".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        },
    }
}

fn call_tool(router: &ToolRouter, req: &JsonRpcRequest) -> JsonRpcResponse {
    let params: ToolCallParams = match serde_json::from_value(req.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return JsonRpcResponse::failure(
                req.id.clone(),
                INVALID_PARAMS,
                format!("invalid tools/call params: {e}"),
            );
        }
    };

    let result = router.call_tool(&params.name, params.arguments).unwrap_or_else(|e| {
        error!(tool = params.name, error = %e, "tool call failed");
        ToolCallResult::error(e)
    });
    JsonRpcResponse::success(req.id.clone(), &result)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

impl JsonRpcResponse {
    fn success(id: Option<serde_json::Value>, result: &impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(v) => Self {
                jsonrpc: "2.0".to_owned(),
                id,
                result: Some(v),
                error: None,
            },
            Err(e) => {
                error!(error = %e, "failed to serialize result");
                Self::failure(id, INTERNAL_ERROR, format!("internal error: {e}"))
            }
        }
    }

    fn failure(id: Option<serde_json::Value>, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }
}

/// Write a JSON-RPC response as a single line.
fn write_response(out: &mut impl Write, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp).context("failed to serialize response")?;
    debug!(response = json, "sending response");
    out.write_all(json.as_bytes())
        .context("failed to write response")?;
    out.write_all(b"\n")
        .context("failed to write response terminator")?;
    out.flush().context("failed to flush response")?;
    Ok(())
}

/// Read one line into `buf`, accepting at most `max_bytes` including the
/// newline.
///
/// Returns the number of bytes read (0 at EOF). An oversized line is skipped
/// through its newline and reported as an error.
fn read_line_limited(reader: &mut impl BufRead, buf: &mut String, max_bytes: usize) -> Result<usize> {
    let mut line = Vec::new();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let read = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut line)
        .context("read failed")?;

    if read > max_bytes {
        if line.last() != Some(&b'\n') {
            reader.skip_until(b'\n').context("read failed")?;
        }
        anyhow::bail!("line exceeds maximum size ({max_bytes} bytes)");
    }

    buf.push_str(std::str::from_utf8(&line).context("non-UTF-8 request data")?);
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        serve(&ScoreConfig::default(), Cursor::new(input.as_bytes()), &mut out).expect("serve");
        String::from_utf8(out)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }

    #[test]
    fn test_initialize_and_notification() {
        let responses = run(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
        ));
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "ocr-score");
    }

    #[test]
    fn test_tools_call_score_pair() {
        let responses = run(concat!(
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"score_pair","arguments":{"expected":"the cat sat","ocr":"the bat sat"}}}"#,
            "\n",
        ));
        assert_eq!(responses[0]["id"], 7);
        let text = responses[0]["result"]["content"][0]["text"].as_str().expect("text");
        let record: serde_json::Value = serde_json::from_str(text).expect("record json");
        assert_eq!(record["score_levenshtein"], 1);
        assert_eq!(record["score_algorithm1"], 1);
    }

    #[test]
    fn test_protocol_errors() {
        let responses = run(concat!(
            "not json\n",
            "\n",
            r#"{"jsonrpc":"1.0","id":2,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{}}"#,
            "\n",
        ));
        let codes: Vec<i64> = responses
            .iter()
            .map(|r| r["error"]["code"].as_i64().expect("error code"))
            .collect();
        assert_eq!(codes, vec![-32700, -32600, -32601, -32602]);
    }

    #[test]
    fn test_oversized_line_is_fatal() {
        let mut input = "x".repeat(MAX_LINE_BYTES + 1);
        input.push('\n');
        let mut out = Vec::new();
        let err = serve(&ScoreConfig::default(), Cursor::new(input.into_bytes()), &mut out)
            .expect_err("oversized line");
        assert!(format!("{err:#}").contains("maximum size"));
    }
}
