use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::error::DomainError;

/// Failure envelope: `{success: false, message, error?}`.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "message": self.message,
        });
        if let Some(error) = self.error {
            body["error"] = json!(error);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Map a domain error to the JSON envelope.
/// `internal_message` is the generic text shown for server-side failures.
pub fn map_domain_error(e: &DomainError, internal_message: &str) -> ApiFailure {
    match e {
        DomainError::MissingSlug
        | DomainError::InvalidSlug { .. }
        | DomainError::InvalidEmail { .. } => ApiFailure {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
            error: None,
        },
        DomainError::EventNotFound { .. } | DomainError::BookingEventMissing { .. } => {
            ApiFailure {
                status: StatusCode::NOT_FOUND,
                message: e.to_string(),
                error: None,
            }
        }
        DomainError::Configuration { .. } | DomainError::Database { .. } => {
            // Full detail stays in the server log; the client gets the display text only
            tracing::error!(error = ?e, "{}", internal_message);
            ApiFailure {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: internal_message.to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}
