use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Terminal failure of one operation, carrying that operation's generic message.
    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Completion gateway error: {0}")]
    Gateway(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

impl AppError {
    /// Collapse storage and gateway failures into `message`; client errors pass through.
    pub fn into_backend(self, message: &str) -> AppError {
        match self {
            AppError::Database(err) => {
                tracing::error!("{}: {}", message, err);
                AppError::Backend(message.to_string())
            }
            AppError::Gateway(err) | AppError::Internal(err) => {
                tracing::error!("{}: {}", message, err);
                AppError::Backend(message.to_string())
            }
            other => other,
        }
    }
}

pub trait BackendContext<T> {
    fn backend(self, message: &str) -> Result<T, AppError>;
}

impl<T, E: Into<AppError>> BackendContext<T> for Result<T, E> {
    fn backend(self, message: &str) -> Result<T, AppError> {
        self.map_err(|e| e.into().into_backend(message))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Backend(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Database(err) => {
                tracing::error!("Unhandled database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal database error".to_string(),
                )
            }
            AppError::Gateway(err) => {
                tracing::error!("Unhandled completion gateway error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Completion service unavailable".to_string(),
                )
            }
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
