use anyhow::Result;
use schemars::schema_for;
use serde_json::{json, Value};

use user_summary::api::rest::dto::{DepartmentSummaryDto, UserDto, UserListDto};
use user_summary::api::rest::error::ErrorResponse;

/// Build the OpenAPI document for the statically-known route set.
///
/// Component schemas come from the schemars derives on the REST DTOs; the
/// document is built once at startup and served as-is.
pub fn build_openapi() -> Result<Value> {
    let mut schemas = serde_json::Map::new();
    schemas.insert(
        "DepartmentSummaryDto".to_string(),
        serde_json::to_value(schema_for!(DepartmentSummaryDto))?,
    );
    schemas.insert(
        "UserDto".to_string(),
        serde_json::to_value(schema_for!(UserDto))?,
    );
    schemas.insert(
        "UserListDto".to_string(),
        serde_json::to_value(schema_for!(UserListDto))?,
    );
    schemas.insert(
        "ErrorResponse".to_string(),
        serde_json::to_value(schema_for!(ErrorResponse))?,
    );

    let error_content = json!({
        "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } }
    });

    Ok(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Deptsum API",
            "version": "0.1.0",
            "description": "Department summary service API"
        },
        "paths": {
            "/summary": {
                "get": {
                    "operationId": "user_summary.get_summary",
                    "summary": "Department summary",
                    "description": "Fetch users from the external source and return per-department statistics keyed by department name",
                    "tags": ["summary"],
                    "responses": {
                        "200": {
                            "description": "Summary keyed by department",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "additionalProperties": {
                                            "$ref": "#/components/schemas/DepartmentSummaryDto"
                                        }
                                    }
                                }
                            }
                        },
                        "500": {
                            "description": "Internal Server Error",
                            "content": error_content.clone()
                        }
                    }
                }
            },
            "/users": {
                "get": {
                    "operationId": "user_summary.list_users",
                    "summary": "List users",
                    "description": "Fetch the department-enriched user records from the external source",
                    "tags": ["users"],
                    "responses": {
                        "200": {
                            "description": "List of users",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UserListDto" }
                                }
                            }
                        },
                        "500": {
                            "description": "Internal Server Error",
                            "content": error_content
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "operationId": "deptsum.health",
                    "summary": "Health check",
                    "tags": ["service"],
                    "responses": {
                        "200": {
                            "description": "Service is healthy",
                            "content": {
                                "application/json": { "schema": { "type": "object" } }
                            }
                        }
                    }
                }
            }
        },
        "components": { "schemas": schemas }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_all_routes() {
        let doc = build_openapi().unwrap();

        assert_eq!(doc["openapi"], "3.0.3");
        for path in ["/summary", "/users", "/health"] {
            assert!(doc["paths"][path]["get"].is_object(), "missing {path}");
        }
        assert!(doc["components"]["schemas"]["DepartmentSummaryDto"].is_object());
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
