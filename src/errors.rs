use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Only {available} questions available with the selected filters. Please adjust your criteria.")]
    InsufficientPool { available: u64, requested: u64 },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InsufficientPool { .. } => "INSUFFICIENT_POOL",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::RenderError(_) => "RENDER_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand to a client. Store and render failures stay generic.
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::RenderError(_) => "Export failed".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::DatabaseError(_))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientPool { .. } => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RenderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::DatabaseError(format!("BSON deserialization error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.public_message()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientPool {
                available: 3,
                requested: 5
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RenderError("font".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_insufficient_pool_message_reports_available_count() {
        let err = AppError::InsufficientPool {
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.public_message(),
            "Only 3 questions available with the selected filters. Please adjust your criteria."
        );
    }

    #[test]
    fn test_render_and_store_errors_are_generic() {
        assert_eq!(
            AppError::RenderError("cannot encode '\u{4e2d}'".into()).public_message(),
            "Export failed"
        );
        assert_eq!(
            AppError::DatabaseError("connection refused".into()).public_message(),
            "Database error"
        );
    }

    #[test]
    fn test_only_store_errors_are_retryable() {
        assert!(AppError::DatabaseError("timeout".into()).is_retryable());
        assert!(!AppError::InsufficientPool {
            available: 0,
            requested: 1
        }
        .is_retryable());
        assert!(!AppError::ValidationError("bad".into()).is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("question".into());
        assert_eq!(err.to_string(), "Not found: question");
    }
}
