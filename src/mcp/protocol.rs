/// MCP (Model Context Protocol) message structures and JSON-RPC handling
/// 
/// This module defines the JSON-RPC message format that MCP clients use to
/// talk to the tracker server.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::DomainError;
use crate::storage::StorageError;
use crate::ServerError;

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
///
/// A message without an `id` is a notification and gets no response.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Unique identifier for this request
    #[serde(default)]
    pub id: Option<Value>,
    /// The method/tool name to call (e.g., "tools/call")
    pub method: String,
    /// Parameters for the method call
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
/// 
/// It contains either a successful result or an error.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP tool call parameters
/// 
/// Arguments are decoded into the tool's own parameter struct.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "habit_create")
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// MCP tool call result
/// 
/// Rejected input is reported here with `is_error` set, not as a JSON-RPC error.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Tool execution results
    pub content: Vec<ToolContent>,
    /// Whether this is an error result
    pub is_error: bool,
    /// Carries `errorCode` for error results
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Type of content (usually "text")
    #[serde(rename = "type")]
    pub content_type: String,
    /// The actual content/result
    pub text: String,
}

/// MCP tool definition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name (e.g., "habit_create")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

/// MCP server capabilities
/// 
/// Only tools are offered.
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// Tools that this server provides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// The tool list never changes at runtime
    pub list_changed: bool,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// MCP protocol version we support
    pub protocol_version: String,
    /// Our server capabilities
    pub capabilities: ServerCapabilities,
    /// Information about our server
    pub server_info: ServerInfo,
}

/// Information about the tracker server
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

// JSON-RPC error codes (standard codes)
pub mod error_codes {
    /// Parse error - Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters - Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific error codes (server range -32000 to -32099)
    /// Habit not found - The specified habit ID doesn't exist
    pub const HABIT_NOT_FOUND: i32 = -32001;
    /// Validation error - Input validation failed
    pub const VALIDATION_ERROR: i32 = -32003;
    /// Storage error - Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32004;
    /// Date error - A day was malformed or not allowed for the operation
    pub const DATE_ERROR: i32 = -32005;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }
    
    /// Create an error response
    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        }
    }
}

impl ToolCallResult {
    /// Create a successful tool result with text content
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
            meta: None,
        }
    }

    /// Create an error tool result
    pub fn error(error_message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            is_error: true,
            meta: None,
        }
    }

    /// Error result for a failed tool call, tagged with its error code
    pub fn from_error(error: &ServerError) -> Self {
        let mut result = Self::error(error.to_string());
        result.meta = Some(serde_json::json!({ "errorCode": error_code(error) }));
        result
    }
}

/// Map a server error to its JSON-RPC error code
pub fn error_code(error: &ServerError) -> i32 {
    match error {
        ServerError::Domain(domain) => domain_error_code(domain),
        ServerError::Database(StorageError::Serialization(_)) => error_codes::INTERNAL_ERROR,
        ServerError::Database(_) => error_codes::STORAGE_ERROR,
        ServerError::Io(_) | ServerError::Json(_) => error_codes::INTERNAL_ERROR,
    }
}

fn domain_error_code(error: &DomainError) -> i32 {
    match error {
        DomainError::HabitNotFound { .. } => error_codes::HABIT_NOT_FOUND,
        DomainError::PastDateNotAllowed { .. }
        | DomainError::FutureMoodNotAllowed { .. }
        | DomainError::InvalidDate(_) => error_codes::DATE_ERROR,
        DomainError::Validation { .. }
        | DomainError::InvalidHabitName(_)
        | DomainError::InvalidEmoji(_)
        | DomainError::UnknownMood(_) => error_codes::VALIDATION_ERROR,
    }
}
