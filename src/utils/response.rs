//! JSON response envelope returned by every request path.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Status code plus JSON body. The body always carries a `message` field.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl WebhookResponse {
    /// `200` with `success: true` and the given message.
    pub fn success(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "success": true, "message": message }),
        }
    }

    /// Error response with only a message.
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    /// Error response with a message and the underlying error text.
    pub fn with_error(status: StatusCode, message: &str, error: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message, "error": error }),
        }
    }

    /// Add an extra field to the body.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.body {
            map.insert(key.to_string(), value.into());
        }
        self
    }
}

impl IntoResponse for WebhookResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
