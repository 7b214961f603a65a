/// Integration test harness: tracker persistence and the MCP request loop
mod server_tests;
mod tracker_tests;
