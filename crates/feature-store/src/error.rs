use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("query preconditions violated: {0}")]
    InvalidArgument(String),

    #[error("indexing request {0} not found")]
    NotFound(String),
}
