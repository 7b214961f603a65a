/// Model Context Protocol front end
///
/// Line-delimited JSON-RPC over stdin/stdout, routing `tools/call` requests
/// to the tool modules.

pub mod protocol;
pub mod server;

pub use server::{tool_definitions, McpServer};
