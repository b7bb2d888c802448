use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Settlement(#[from] settlement::Error),

    #[error("Invalid JSON payload: {0}")]
    Payload(String),

    #[error("Endpoint not found")]
    NotFound,

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Internal server error during settlement calculation: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(json!({
            "error": {
                "code": status_code.as_u16(),
                "message": self.to_string(),
                "type": self.error_type()
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Settlement(settlement::Error::Unbalanced { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Settlement(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Settlement(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    fn error_type(&self) -> &str {
        match self {
            ApiError::Settlement(settlement::Error::Unbalanced { .. }) => "unbalanced",
            ApiError::Settlement(settlement::Error::DuplicateId(_)) => "duplicate_error",
            ApiError::Settlement(e) if e.is_validation() => "validation_error",
            ApiError::Settlement(_) => "internal_error",
            ApiError::Payload(_) => "invalid_payload",
            ApiError::NotFound => "not_found",
            ApiError::Metrics(_) => "metrics_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}
