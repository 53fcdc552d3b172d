use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// "No products matched the filters" is deliberately absent: it is a normal
/// outcome of ranking (see `RankOutcome::NoMatches`), not a failure.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Input rejected before any computation (alpha out of range, bad filter, ...)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Catalog, similarity matrix and filtered subset disagree with each other
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DataIntegrity(_)
            | AppError::Io(_)
            | AppError::Csv(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
