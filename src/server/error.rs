//! HTTP error mapping.
//!
//! Every failure becomes a JSON body `{"error": ..., "details"?: ...}` with
//! a status code the front-end can branch on.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::error::HelpdeskError;

/// Error returned by the `/tickets` handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method parameter is required")]
    MissingMethod,

    #[error("Invalid method")]
    InvalidMethod,

    #[error("{0}")]
    BadRequest(String),

    #[error("Body parse error: {0}")]
    BodyParse(String),

    #[error("Ticket not found")]
    NotFound,

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingMethod | Self::InvalidMethod | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::BodyParse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            Self::BadRequest(message) => (message.clone(), None),
            Self::BodyParse(details) => ("Body parse error".to_string(), Some(details.clone())),
            Self::Internal(details) => ("Internal server error".to_string(), Some(details.clone())),
            Self::MissingMethod | Self::InvalidMethod | Self::NotFound => (self.to_string(), None),
        };
        ErrorBody { error, details }
    }
}

impl From<HelpdeskError> for ApiError {
    fn from(err: HelpdeskError) -> Self {
        match err {
            HelpdeskError::TicketNotFound { .. } => Self::NotFound,
            HelpdeskError::InvalidInput { field, reason } => {
                Self::BadRequest(format!("{} {reason}", capitalize(&field)))
            }
            other => {
                error!(reason = %other, "ticket operation failed");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingMethod.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidMethod.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::BodyParse("eof".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("disk".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_helpdesk_error() {
        let err = ApiError::from(HelpdeskError::invalid_input("name", "is required"));
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Name is required"));

        let err = ApiError::from(HelpdeskError::not_found("x"));
        assert!(matches!(err, ApiError::NotFound));

        let err = ApiError::from(HelpdeskError::Storage("disk full".into()));
        assert!(matches!(err, ApiError::Internal(ref d) if d.contains("disk full")));
    }

    #[test]
    fn test_body_shapes() {
        let body = serde_json::to_value(ApiError::NotFound.body()).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Ticket not found" }));

        let body = serde_json::to_value(ApiError::Internal("boom".into()).body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Internal server error", "details": "boom" })
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("id"), "Id");
        assert_eq!(capitalize(""), "");
    }
}
