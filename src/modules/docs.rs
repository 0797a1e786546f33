//! OpenAPI fragments reused by the resource modules.

use serde_json::json;

/// OpenAPI path parameter for a numeric id
pub fn id_parameter(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer" }
    })
}

/// OpenAPI response referencing the shared error schema
pub fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}
