use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the read API.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Paper not found: {id}")]
    PaperNotFound { id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaperNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match &self {
            AppError::PaperNotFound { .. } | AppError::Validation(_) => {
                tracing::debug!(%message, "Client error");
            }
            _ => {
                tracing::error!(%message, error = ?self, "Server error");
            }
        };

        let body = Json(json!({
            "error": {
                "status": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Feed fetch failures. Any of these aborts the whole ingestion run.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    Status(StatusCode),

    #[error("Feed parse error: {0}")]
    Parse(String),
}

/// Fatal ingestion-run failures. Per-entry problems are not errors:
/// the orchestrator logs and skips those, and the run continues.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Feed fetch failed: {0}")]
    Feed(#[from] FeedError),

    #[error("Store operation failed: {0}")]
    Store(#[source] AppError),
}
