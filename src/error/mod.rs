use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Store operation timed out: {0}")]
    Timeout(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error = ErrorResponse {
            error: self.to_string(),
        };

        match self {
            ApiError::InvalidInput(_) => HttpResponse::BadRequest().json(error),
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(error),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error),
            ApiError::Timeout(_) => HttpResponse::GatewayTimeout().json(error),
            ApiError::StoreUnavailable(_) => HttpResponse::ServiceUnavailable().json(error),
            _ => HttpResponse::InternalServerError().json(error),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for ApiError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ApiError::Timeout(err.to_string())
    }
}

// A poisoned store lock means a writer panicked mid-update; the store is
// reported unreachable rather than answered with an empty result.
impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
