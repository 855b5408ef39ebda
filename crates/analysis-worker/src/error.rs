//! Worker error taxonomy (spec §7).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),

    #[error("{0} is not a valid {1}")]
    InvalidValue(&'static str, &'static str),
}

/// Per-game errors are logged and swallowed; per-month errors are
/// fatal and terminate the request in FAILED (spec §4.9).
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("PGN parse failed: {0}")]
    PgnParseFailed(String),

    #[error("store failed: {0}")]
    StoreFailed(#[from] feature_store::StoreError),

    #[error("feature extraction failed: {0}")]
    ExtractFailed(#[from] chess_analyzers::ExtractError),
}
