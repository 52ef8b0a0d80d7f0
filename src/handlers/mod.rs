pub mod tech_stack_guidance;

use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolResult,
};
use crate::radar::Radar;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, radar: &Radar) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            log_client(req.params.as_ref());
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "radar-mcp-server",
                    "title": "Tech Radar",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": format!(
                    "Call {} for technology adoption guidance before choosing a stack.",
                    tech_stack_guidance::TOOL_NAME
                )
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [tech_stack_guidance::definition()]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, radar).await;
            match serde_json::to_value(&tool_result) {
                Ok(result_json) => Some(JsonRpcResponse::success(req.id.clone(), result_json)),
                Err(e) => {
                    tracing::error!(error = %e, "Cannot serialize tool result");
                    Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::internal_error("Cannot serialize tool result"),
                    ))
                }
            }
        }

        // notifications/initialized, notifications/cancelled, ...
        _ if req.id.is_none() => None,

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, radar: &Radar) -> ToolResult {
    match params.name.as_str() {
        tech_stack_guidance::TOOL_NAME => {
            tech_stack_guidance::handle(params.arguments.as_ref(), radar).await
        }

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}

fn log_client(params: Option<&serde_json::Value>) {
    let Some(params) = params else {
        return;
    };
    match serde_json::from_value::<InitializeParams>(params.clone()) {
        Ok(init) => {
            let client = init.client_info.as_ref();
            tracing::info!(
                client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                protocol_version = init.protocol_version.as_deref().unwrap_or("unspecified"),
                "Client initializing"
            );
        }
        Err(e) => tracing::warn!(error = %e, "Unreadable initialize params"),
    }
}
