/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads one JSON-RPC message per line
/// 2. Runs tool calls against the tracker, strictly one at a time
/// 3. Writes one JSON-RPC response per line

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolOutput};
use crate::{HabitTracker, ServerError};

/// MCP server that owns the tracker session
pub struct McpServer {
    tracker: HabitTracker,
    /// Whether the client sent its initialized notification
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tracker: HabitTracker) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    pub fn tracker(&self) -> &HabitTracker {
        &self.tracker
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until it reaches end of input
    ///
    /// A line that is not valid UTF-8 gets a parse error and the loop carries
    /// on. Only a failing reader or writer ends the session early.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();

            if reader.read_until(b'\n', &mut buf).await? == 0 {
                info!("MCP server shutting down (input closed)");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.process_line(line).await,
                Err(e) => {
                    error!("Request is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        json!(null),
                        error_codes::PARSE_ERROR,
                        format!("Invalid UTF-8: {}", e),
                        None,
                    ))
                }
            };

            if let Some(response) = response {
                let response_str = serde_json::to_string(&response)?;

                // Write response + newline
                writer.write_all(response_str.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;

                debug!("Sent response: {}", response_str);
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request; notifications produce no response
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Mood Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        if !self.initialized {
            debug!("Tool '{}' called before the initialized notification", tool_params.name);
        }

        let arguments = Value::Object(tool_params.arguments.into_iter().collect());
        let tracker = &mut self.tracker;

        let outcome = match tool_params.name.as_str() {
            "habit_create" => call(arguments, |p| tools::create_habit(tracker, p)),
            "habit_edit" => call(arguments, |p| tools::edit_habit(tracker, p)),
            "habit_delete" => call(arguments, |p| tools::delete_habit(tracker, p)),
            "habit_set_completion" => call(arguments, |p| tools::set_completion(tracker, p)),
            "habit_list" => call(arguments, |p| tools::list_habits(tracker, p)),
            "habit_stats" => call(arguments, |p| tools::get_statistics(tracker, p)),
            "mood_log" => call(arguments, |p| tools::log_mood(tracker, p)),
            "mood_delete" => call(arguments, |p| tools::delete_mood(tracker, p)),
            "mood_trend" => call(arguments, |p| tools::mood_trend(tracker, p)),
            "mood_calendar" => call(arguments, |p| tools::mood_calendar(tracker, p)),
            _ => Ok(ToolCallResult::error(format!("Unknown tool: {}", tool_params.name))),
        };

        match outcome {
            Ok(result) => to_response(id, &result),
            Err(e) => JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid arguments for '{}': {}", tool_params.name, e),
                None,
            ),
        }
    }
}

/// Decode the arguments, run the tool and render its message
///
/// Only malformed arguments fail here; tool errors become error results.
fn call<P, R>(
    arguments: Value,
    tool: impl FnOnce(P) -> Result<R, ServerError>,
) -> Result<ToolCallResult, serde_json::Error>
where
    P: DeserializeOwned,
    R: ToolOutput,
{
    let params: P = serde_json::from_value(arguments)?;

    Ok(match tool(params) {
        Ok(response) => ToolCallResult::success(response.into_message()),
        Err(e) => {
            warn!("Tool call failed: {}", e);
            ToolCallResult::from_error(&e)
        }
    })
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
            None,
        ),
    }
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = schemars::schema_for!(P);

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

/// Every tool this server offers, with input schemas from the parameter types
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        definition::<tools::CreateHabitParams>(
            "habit_create",
            "Create a habit, either every day from today on or on one specific day",
        ),
        definition::<tools::EditHabitParams>(
            "habit_edit",
            "Edit a habit's name, emoji, description or schedule; completion history is kept",
        ),
        definition::<tools::DeleteHabitParams>("habit_delete", "Permanently delete a habit"),
        definition::<tools::SetCompletionParams>(
            "habit_set_completion",
            "Mark a habit done or not done for a day; toggles when 'completed' is omitted",
        ),
        definition::<tools::ListHabitsParams>(
            "habit_list",
            "List the habits shown on a day with their completion marks",
        ),
        definition::<tools::StatsParams>(
            "habit_stats",
            "Completion percentage for a day, weekly average, current streak and the last 7 days",
        ),
        definition::<tools::LogMoodParams>(
            "mood_log",
            "Log the mood for today or a past day, replacing any earlier entry",
        ),
        definition::<tools::DeleteMoodParams>("mood_delete", "Remove the mood logged for a day"),
        definition::<tools::MoodTrendParams>(
            "mood_trend",
            "Mood scores for the last 7 days and the most common mood",
        ),
        definition::<tools::MoodCalendarParams>(
            "mood_calendar",
            "Month calendar of logged moods",
        ),
    ]
}
