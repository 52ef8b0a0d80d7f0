use serde_json::{json, Value};

use crate::protocol::{McpErrorCode, McpErrorResponse, TechStackGuidanceParams, ToolResult};
use crate::radar::{normalize_filters, Axis, Radar};
use crate::schema::{self, SchemaValidationError};

pub const TOOL_NAME: &str = "get_tech_stack_guidance";

const TOOL_TITLE: &str = "Tech Radar — Tech Stack Guidance";

/// Tool definition advertised by `tools/list`.
pub fn definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "title": TOOL_TITLE,
        "description": description(),
        "inputSchema": schema::guidance_input_schema(),
        "outputSchema": schema::guidance_output_schema(),
        "annotations": {
            "title": TOOL_TITLE,
            "readOnlyHint": true,
            "destructiveHint": false,
            "idempotentHint": true,
            "openWorldHint": true
        }
    })
}

fn description() -> String {
    format!(
        "Get the organization's technology decisions and recommendations from the Tech Radar.\n\
         \n\
         Use this tool when:\n\
         - Designing new features or products to choose the right tech stack\n\
         - Writing PRDs or technical specifications\n\
         - Making architecture decisions or technology trade-offs\n\
         - Evaluating whether to adopt, consider, experiment with, or avoid specific technologies\n\
         - Understanding standard practices and approved alternatives\n\
         \n\
         Returns curated technology choices with decision rationale, use cases, and alternatives.\n\
         \n\
         Quadrants: {}\n\
         Rings: {}\n\
         \n\
         Examples:\n\
         - {TOOL_NAME}() - all technology decisions\n\
         - {TOOL_NAME}(quadrant=[1], ring=[0, 1]) - Primary + Consider languages/frameworks\n\
         - {TOOL_NAME}(ring=[0]) - all primary/default technologies across categories",
        Axis::Quadrant.legend(),
        Axis::Ring.legend(),
    )
}

/// Handle a `get_tech_stack_guidance` tool call.
///
/// Normalizes the quadrant/ring filters, rejects values outside 0–3, and
/// returns the matching entries sorted by ring then label. A malformed
/// filter fails the whole call; there is no partial result.
pub async fn handle(arguments: Option<&Value>, radar: &Radar) -> ToolResult {
    let params: TechStackGuidanceParams = match arguments {
        None | Some(Value::Null) => TechStackGuidanceParams::default(),
        // Derived Deserialize also reads arrays positionally; only objects are arguments
        Some(v @ Value::Object(_)) => match serde_json::from_value(v.clone()) {
            Ok(p) => p,
            Err(e) => {
                return McpErrorResponse::new(
                    McpErrorCode::InvalidArguments,
                    format!("Invalid arguments for {TOOL_NAME}: {e}"),
                )
                .into();
            }
        },
        Some(_) => {
            return McpErrorResponse::new(
                McpErrorCode::InvalidArguments,
                format!("Invalid arguments for {TOOL_NAME}: expected an object"),
            )
            .into();
        }
    };

    match guidance(&params, radar) {
        Ok(value) => ToolResult::structured(value),
        Err(mcp_err) => mcp_err.into(),
    }
}

fn guidance(params: &TechStackGuidanceParams, radar: &Radar) -> Result<Value, McpErrorResponse> {
    let filters = normalize_filters(params.quadrant.as_ref(), params.ring.as_ref()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed filter");
        McpErrorResponse::new(McpErrorCode::InvalidFilter, e.to_string())
    })?;

    schema::check_filter_range(&filters).map_err(|e| match e {
        SchemaValidationError::ValidationFailed(detail) => McpErrorResponse::new(
            McpErrorCode::FilterOutOfRange,
            format!("Filter values must be integers between 0 and 3: {detail}"),
        ),
        other => {
            tracing::error!(error = %other, "Filter range check failed");
            McpErrorResponse::canonical(McpErrorCode::InternalError)
        }
    })?;

    let unfiltered = filters.is_unfiltered();
    let response = radar.guidance(filters);
    tracing::debug!(
        unfiltered,
        count = response.count,
        duration_ms = response.duration_ms,
        "Served tech stack guidance"
    );

    serde_json::to_value(&response).map_err(|e| {
        tracing::error!(error = %e, "Serialization failed");
        McpErrorResponse::canonical(McpErrorCode::InternalError)
    })
}
