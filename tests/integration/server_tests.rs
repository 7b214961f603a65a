/// Full MCP sessions driven through in-memory pipes
use habit_mood_tracker::mcp::McpServer;
use habit_mood_tracker::*;
use serde_json::{json, Value};
use tokio::io::BufReader;

fn server(today: DateKey) -> McpServer {
    let storage = SqliteStorage::in_memory().expect("Failed to open storage");
    let tracker = HabitTracker::with_storage(storage, Clock::Fixed(today)).expect("Failed to load tracker");
    McpServer::new(tracker)
}

async fn exchange(server: &mut McpServer, requests: &[Value]) -> Vec<Value> {
    let input = requests
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let mut output: Vec<u8> = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("Server loop failed");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap_or_default()
}

#[cfg(test)]
mod server_tests {
    use super::*;

    #[tokio::test]
    async fn test_handshake_and_tool_listing() {
        let mut server = server(DateKey::from_parts(2024, 6, 12).unwrap());
        let responses = exchange(
            &mut server,
            &[
                json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                    "protocolVersion": "2024-11-05", "capabilities": {},
                    "clientInfo": {"name": "test", "version": "0"}
                }}),
                json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
                json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            ],
        )
        .await;

        // The notification gets no reply
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["protocolVersion"], json!("2024-11-05"));
        assert_eq!(responses[0]["result"]["capabilities"]["tools"]["listChanged"], json!(false));

        let names: Vec<&str> = responses[1]["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"habit_create"));
        assert!(names.contains(&"habit_set_completion"));
        assert!(names.contains(&"mood_calendar"));
        assert!(responses[1]["result"]["tools"][0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_habit_workflow() {
        let today = DateKey::from_parts(2024, 6, 12).unwrap();
        let mut server = server(today);

        let created = exchange(
            &mut server,
            &[call(1, "habit_create", json!({"name": "Drink", "emoji": "💧", "description": "8 glasses"}))],
        )
        .await;
        assert_eq!(created[0]["result"]["isError"], json!(false));
        assert!(text(&created[0]).contains("Habit ID:"));

        let habit_id = server.tracker().habits().habits()[0].id.to_string();

        let responses = exchange(
            &mut server,
            &[
                call(2, "habit_set_completion", json!({"habit_id": habit_id})),
                call(3, "habit_stats", json!({})),
                call(4, "habit_list", json!({"date": "2024-06-11"})),
                call(5, "habit_edit", json!({"habit_id": habit_id, "date": "2024-06-01"})),
            ],
        )
        .await;

        assert!(text(&responses[0]).contains("done for Today"));
        assert!(text(&responses[1]).contains("1/1 done (100.0%)"));
        assert!(text(&responses[1]).contains("Current streak: 1 day"));
        assert!(text(&responses[2]).starts_with("No habits for Yesterday"));
        assert_eq!(responses[3]["result"]["isError"], json!(true));
        assert!(server.tracker().habits().habits()[0].recurrence.is_everyday());

        let deleted = exchange(&mut server, &[call(6, "habit_delete", json!({"habit_id": habit_id}))]).await;
        assert_eq!(deleted[0]["result"]["isError"], json!(false));
        assert!(server.tracker().habits().is_empty());
        assert!(server.tracker().storage().load_habits().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mood_workflow() {
        let today = DateKey::from_parts(2024, 6, 12).unwrap();
        let mut server = server(today);

        let responses = exchange(
            &mut server,
            &[
                call(1, "mood_log", json!({"mood": "Good", "date": "2024-06-10"})),
                call(2, "mood_log", json!({"mood": "Good", "date": "2024-06-11"})),
                call(3, "mood_log", json!({"mood": "Bad", "reason": "rain"})),
                call(4, "mood_trend", json!({})),
                call(5, "mood_calendar", json!({"year": 2024, "month": 6})),
                call(6, "mood_delete", json!({"date": "2024-06-10"})),
                call(7, "mood_log", json!({"mood": "Great", "date": "2024-06-13"})),
            ],
        )
        .await;

        assert!(text(&responses[2]).starts_with("😢"));
        assert!(text(&responses[3]).contains("Most common: Good"));
        assert!(text(&responses[4]).contains("3 moods logged"));
        assert!(text(&responses[5]).contains("Removed mood"));
        assert_eq!(responses[6]["result"]["isError"], json!(true));

        let moods = server.tracker().storage().load_mood_map().unwrap();
        assert_eq!(moods.len(), 2);
        assert_eq!(moods.get(&today).unwrap().reason, "rain");
    }

    #[test]
    fn test_unknown_tool_reports_error() {
        let mut server = server(DateKey::from_parts(2024, 6, 12).unwrap());
        let responses = tokio_test::block_on(exchange(&mut server, &[call(1, "habit_explode", json!({}))]));
        assert_eq!(responses[0]["result"]["isError"], json!(true));
        assert!(text(&responses[0]).contains("Unknown tool"));
    }
}
