use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The configured origin could not be read or answered with a failure status
    #[error("Failed to fetch data: {0}")]
    SourceUnavailable(String),

    /// The origin was read but its content is not a list of items
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// A query ran before any load succeeded
    #[error("Data not loaded")]
    DataNotLoaded,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::SourceUnavailable(_)
            | AppError::MalformedData(_)
            | AppError::DataNotLoaded => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedData(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
