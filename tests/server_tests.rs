//! Stdio transport loop, driven through in-memory reader/writer pairs.

use std::sync::Arc;

use radar_mcp_server::radar::{Radar, RadarEntry};
use radar_mcp_server::server::McpServer;
use serde_json::{json, Value};

fn test_server() -> McpServer {
    let entries = vec![
        json!({"label": "Kafka", "quadrant": 0, "ring": 1}),
        json!({"label": "Go", "quadrant": 1, "ring": 0}),
    ];
    let radar = Radar::new(
        "https://radar.test/radar-entries.json",
        entries.into_iter().filter_map(RadarEntry::from_value).collect(),
    );
    McpServer::new(Arc::new(radar))
}

/// Feed `lines` to a fresh server and return every response line, parsed.
async fn session(lines: &[&str]) -> (McpServer, Vec<Value>) {
    let mut server = test_server();
    let input = lines.iter().map(|l| format!("{l}\n")).collect::<String>();
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (server, responses)
}

const INITIALIZE: &str =
    r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test","version":"1"}}}"#;
const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

#[tokio::test]
async fn full_session_returns_guidance() {
    let (server, responses) = session(&[
        INITIALIZE,
        INITIALIZED,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":"call-1","method":"tools/call","params":{"name":"get_tech_stack_guidance","arguments":{"ring":"0"}}}"#,
    ])
    .await;

    assert!(server.is_initialized());
    assert_eq!(responses.len(), 3, "notification must not produce a response");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["result"]["tools"][0]["name"], "get_tech_stack_guidance");

    assert_eq!(responses[2]["id"], "call-1");
    let content = &responses[2]["result"]["structuredContent"];
    assert_eq!(content["count"], 1);
    assert_eq!(content["entries"][0]["label"], "Go");
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let (server, responses) = session(&[
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        INITIALIZED,
    ])
    .await;

    assert!(!server.is_initialized());
    assert_eq!(responses.len(), 1, "notifications before initialize are dropped");
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
}

#[tokio::test]
async fn unparseable_line_gets_parse_error_and_loop_continues() {
    let (_, responses) = session(&[
        "{not json",
        INITIALIZE,
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
    ])
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0].get("id").is_none());
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_invalid_request() {
    let (server, responses) = session(&[r#"{"jsonrpc":"1.0","id":7,"method":"initialize"}"#]).await;

    assert!(!server.is_initialized());
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["id"], 7);
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let (_, responses) = session(&["", "   ", INITIALIZE, ""]).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "radar-mcp-server");
}

#[tokio::test]
async fn invalid_utf8_gets_parse_error() {
    let mut server = test_server();
    let mut input = vec![0xff, 0xfe, b'\n'];
    input.extend_from_slice(INITIALIZE.as_bytes());
    input.push(b'\n');
    let mut output = Vec::new();

    server.serve(input.as_slice(), &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let responses: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(server.is_initialized());
}

#[tokio::test]
async fn empty_input_ends_cleanly() {
    let (server, responses) = session(&[]).await;
    assert!(!server.is_initialized());
    assert!(responses.is_empty());
}
