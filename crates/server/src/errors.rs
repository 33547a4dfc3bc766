use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use service::errors::{FieldError, ServiceError};

const VALIDATION_ERROR: &str = "Validation Error";

/// JSON error body returned by every API handler.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), errors: Vec::new() }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, error: VALIDATION_ERROR.into(), errors }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.error, errors: self.errors };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidFields(errors) => Self::validation(errors),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => {
                Self::validation(vec![FieldError::new("body", msg)])
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Rule(rule) => {
                warn!(error = %rule, "business rule rejected request");
                Self::new(StatusCode::BAD_REQUEST, rule.to_string())
            }
            other => {
                error!(error = %other, "request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        let message = match rejection {
            PathRejection::FailedToDeserializePathParams(_) => "must be an integer".to_string(),
            other => other.body_text(),
        };
        Self::validation(vec![FieldError::new("id", message)])
    }
}
