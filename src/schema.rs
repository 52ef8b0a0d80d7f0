use std::sync::OnceLock;

use jsonschema::{validator_for, Validator};
use serde_json::{json, Value};

use crate::radar::{Axis, Filters, MAX_AXIS_VALUE, MIN_AXIS_VALUE};

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed: {0}")]
    ValidationFailed(String),
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
/// Returns Ok(()) if valid, Err otherwise.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;
    validate_value(&schema_json, &instance_json)
}

/// Validate an already-parsed instance against an already-parsed schema.
pub fn validate_value(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;
    check(&validator, instance)
}

fn check(validator: &Validator, instance: &Value) -> Result<(), SchemaValidationError> {
    validator
        .validate(instance)
        .map_err(|e| SchemaValidationError::ValidationFailed(e.to_string()))
}

/// Reject normalized filters holding values outside the axis range.
///
/// Normalization itself is permissive; this is the tool-boundary check.
pub fn check_filter_range(filters: &Filters) -> Result<(), SchemaValidationError> {
    static VALIDATOR: OnceLock<Validator> = OnceLock::new();

    let validator = match VALIDATOR.get() {
        Some(v) => v,
        None => {
            let compiled = validator_for(&filters_schema())
                .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;
            VALIDATOR.get_or_init(|| compiled)
        }
    };

    check(validator, &serde_json::to_value(filters)?)
}

/// Schema of the echoed `filters` object.
pub fn filters_schema() -> Value {
    let axis_filter = json!({
        "type": ["array", "null"],
        "items": {
            "type": "integer",
            "minimum": MIN_AXIS_VALUE,
            "maximum": MAX_AXIS_VALUE
        }
    });

    json!({
        "type": "object",
        "required": ["quadrant", "ring"],
        "additionalProperties": false,
        "properties": {
            "quadrant": axis_filter,
            "ring": axis_filter
        }
    })
}

/// `inputSchema` advertised for `get_tech_stack_guidance`.
pub fn guidance_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "quadrant": axis_input_schema(Axis::Quadrant),
            "ring": axis_input_schema(Axis::Ring)
        }
    })
}

fn axis_input_schema(axis: Axis) -> Value {
    let item = json!({
        "type": "integer",
        "minimum": MIN_AXIS_VALUE,
        "maximum": MAX_AXIS_VALUE
    });

    json!({
        "description": format!(
            "{} filter as an array of integers ({MIN_AXIS_VALUE}–{MAX_AXIS_VALUE}). {}.",
            capitalize(axis.key()),
            axis.legend()
        ),
        "anyOf": [
            { "type": "array", "items": { "anyOf": [item.clone(), { "type": "string" }] } },
            item,
            { "type": "string" },
            { "type": "null" }
        ]
    })
}

/// `outputSchema` advertised for `get_tech_stack_guidance`.
pub fn guidance_output_schema() -> Value {
    let axis_echo = json!({
        "anyOf": [
            { "type": "array", "items": { "type": "integer" } },
            { "type": "null" }
        ]
    });

    json!({
        "type": "object",
        "required": ["source_url", "filters", "count", "duration_ms", "entries"],
        "properties": {
            "source_url": { "type": "string" },
            "filters": {
                "type": "object",
                "required": ["quadrant", "ring"],
                "properties": {
                    "quadrant": axis_echo,
                    "ring": axis_echo
                }
            },
            "count": { "type": "integer", "minimum": 0 },
            "duration_ms": { "type": "integer", "minimum": 0 },
            "entries": {
                "type": "array",
                "items": radar_entry_schema()
            }
        }
    })
}

/// Entries are passed through exactly as published upstream, so fields are
/// described but not typed; `quadrant`/`ring` may arrive as numeric strings.
fn radar_entry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "label": { "description": "Technology name" },
            "quadrant": { "description": "Quadrant index (0-3)" },
            "ring": { "description": "Ring index (0-3)" },
            "summary": { "description": "Short description" },
            "decision": { "description": "Decision rationale" },
            "when_to_use": { "description": "Recommended use cases" },
            "consider_alternitive": { "description": "Alternatives to consider" },
            "links": { "description": "Reference links" },
            "logo": { "description": "Logo asset" }
        }
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
