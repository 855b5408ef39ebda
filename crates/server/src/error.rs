use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Query(#[from] chessql::QueryError),

    #[error(transparent)]
    Store(#[from] feature_store::StoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Query(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Store(feature_store::StoreError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("indexing request {id} not found"))
            }
            AppError::Store(feature_store::StoreError::InvalidArgument(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            AppError::Sqlx(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            AppError::Anyhow(e) => {
                tracing::error!(error = %e, "unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
