use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Standard API error response
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub code: u16,
    /// RFC3339 timestamp when the error occurred
    pub timestamp: String,
    /// Optional request ID for tracking
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: None,
        }
    }

    pub fn with_request_id(
        error: impl Into<String>,
        code: u16,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: Some(request_id.into()),
        }
    }
}

/// Handler-level error carrying the status and the generic message exposed
/// to the client. Internal error detail goes to the log, never the body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    pub fn internal(message: impl Into<String>, request_id: Option<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            request_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.request_id {
            Some(rid) => ErrorResponse::with_request_id(self.message, self.status.as_u16(), rid),
            None => ErrorResponse::new(self.message, self.status.as_u16()),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Request id set by the ingress middleware, if any.
pub fn request_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
