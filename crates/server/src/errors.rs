use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::ApiResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Handler error rendered as the standard envelope with `code` = HTTP status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self { status, message: message.into(), details }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => ApiResponse::error_with(self.status.as_u16(), self.message, details),
            None => ApiResponse::error(self.status.as_u16(), self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => JsonApiError::new(
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {}", errs),
                serde_json::to_value(errs.errors()).ok(),
            ),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg, None),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, msg, None),
            ServiceError::Db(msg) => {
                error!(err = %msg, "database operation failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        JsonApiError::bad_request(format!("Malformed request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        JsonApiError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::validation::ValidationErrors;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation(ValidationErrors::single("email", "bad")), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("Student with id 1 not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("Email 'a@b.co' already exists".into()), StatusCode::CONFLICT),
            (ServiceError::Db("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn validation_error_carries_field_details() {
        let err = JsonApiError::from(ServiceError::Validation(ValidationErrors::single("location", "Family location is required")));
        assert_eq!(err.message, "Validation failed: location: Family location is required");
        assert_eq!(
            err.details,
            Some(serde_json::json!([{"field": "location", "message": "Family location is required"}]))
        );
    }

    #[test]
    fn db_error_hides_internals() {
        let err = JsonApiError::from(ServiceError::Db("password authentication failed".into()));
        assert_eq!(err.message, "Internal server error");
        assert!(err.details.is_none());
    }
}
