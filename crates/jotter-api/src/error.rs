//! HTTP error responses.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

/// Error returned by handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    Internal(jotter_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
}

impl From<jotter_core::Error> for ApiError {
    fn from(err: jotter_core::Error) -> Self {
        match err {
            jotter_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            jotter_core::Error::NoteNotFound(id) => {
                ApiError::NotFound(format!("Note {} not found", id))
            }
            jotter_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            jotter_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                error!(subsystem = "api", error = %err, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::Unauthorized(msg) | ApiError::NotFound(msg) | ApiError::BadRequest(msg) => {
                msg
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                jotter_core::Error::NoteNotFound(Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                jotter_core::Error::NotFound("User".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                jotter_core::Error::InvalidInput("Title is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                jotter_core::Error::Unauthorized("Token is invalid".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                jotter_core::Error::Request("timeout".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response =
            ApiError::from(jotter_core::Error::Internal("pool exhausted".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_note_not_found_message() {
        let id = Uuid::nil();
        match ApiError::from(jotter_core::Error::NoteNotFound(id)) {
            ApiError::NotFound(msg) => assert_eq!(msg, format!("Note {} not found", id)),
            other => panic!("unexpected {:?}", other),
        }
    }
}
