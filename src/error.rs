use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request payload failed field validation
    #[error("Validation failed for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mut body = json!({
            "error": {
                "message": self.to_string(),
                "type": error_type_name(&self),
            }
        });

        if let Self::Validation { field, .. } = &self {
            body["error"]["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Validation { .. } => "validation_error",
        AppError::Database(_) => "database_error",
        AppError::Config(_) => "config_error",
        AppError::Internal(_) => "internal_error",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::validation("name", "must not be empty");
        assert_eq!(
            error.to_string(),
            "Validation failed for `name`: must not be empty"
        );
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(
            error_type_name(&AppError::validation("price", "too precise")),
            "validation_error"
        );
        assert_eq!(
            error_type_name(&AppError::Internal("test".to_string())),
            "internal_error"
        );
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let error = AppError::validation("name", "must not be empty");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_database_error_response() {
        let error = AppError::Database(sqlx::Error::PoolTimedOut);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
