//! Merged OpenAPI document built from module fragments

use catalog_kernel::{settings::ServerSettings, ModuleRegistry};
use serde_json::{json, Value};

use crate::join_path;

/// Collect every module's OpenAPI fragment into one document.
///
/// Module paths are prefixed with the configured base path; module
/// components are merged next to the shared `ErrorResponse` schema.
pub fn document(registry: &ModuleRegistry, server: &ServerSettings) -> Value {
    let base_path = server.base_path.as_str();
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Catalog API",
            "version": "1.0.0",
            "description": "Events and books/genres resources"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    });

    if server.expose_reset {
        openapi_spec["paths"][join_path(base_path, "/reset")] = json!({
            "get": {
                "summary": "Restore every resource to its fixture data",
                "tags": ["Support"],
                "responses": {
                    "200": { "description": "State reset" }
                }
            }
        });
    }

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                openapi_spec["paths"][join_path(base_path, path)] = path_item.clone();
            }
        }

        // Merge every components section (schemas, securitySchemes, ...)
        if let Some(components) = module_spec.get("components").and_then(Value::as_object) {
            for (section, entries) in components {
                let Some(entries) = entries.as_object() else {
                    continue;
                };
                for (name, definition) in entries {
                    openapi_spec["components"][section][name] = definition.clone();
                }
            }
        }
    }

    openapi_spec
}

/// Convert the merged JSON document into the typed form Swagger UI serves.
pub fn typed(document: &Value) -> utoipa::openapi::OpenApi {
    serde_json::from_value(document.clone()).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "merged OpenAPI document is not valid; serving a stub");
        utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title("Catalog API")
                    .version("1.0.0")
                    .build(),
            )
            .build()
    })
}
