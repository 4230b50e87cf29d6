//! Request-level error classification.

use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::utils::WebhookResponse;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed. Only POST is accepted";
pub const MISSING_FIELDS: &str = "userId and score are required";
pub const SCORE_NOT_NUMBER: &str = "score must be a number";
pub const CONFIGURATION_ERROR: &str = "Server configuration error";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Every way a request can fail.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The service started without usable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    /// Submission is missing or has unusable fields. Nothing was written.
    #[error("{0}")]
    Validation(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Database failure while applying a submission.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::MalformedBody(_) | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert into the response sent to the caller.
    ///
    /// Only the error's display text reaches the caller; the full chain is
    /// logged here.
    pub fn respond(self) -> WebhookResponse {
        let status = self.status();
        match &self {
            Self::Configuration(_) => WebhookResponse::message(status, CONFIGURATION_ERROR),
            Self::MethodNotAllowed(_) => WebhookResponse::message(status, METHOD_NOT_ALLOWED),
            Self::Validation(message) => WebhookResponse::message(status, message),
            Self::MalformedBody(e) => {
                error!("Failed to parse request body: {}", e);
                WebhookResponse::with_error(status, INTERNAL_ERROR, &e.to_string())
            }
            Self::Upstream(e) => {
                error!("Database error: {:#}", e);
                WebhookResponse::with_error(status, INTERNAL_ERROR, &e.to_string())
            }
        }
    }
}
