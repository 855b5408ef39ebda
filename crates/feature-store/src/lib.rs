//! Postgres-backed feature store (spec §4.8, §6): schema, idempotent
//! upsert of `GameFeatureRow`, and parameterized ChessQL query
//! execution.

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use models::{GameFeatureProjection, GameFeatureRow, IndexingRequest, IndexingStatus, PlatformGame};
pub use schema::{create_pool, run_migrations};
pub use store::{
    bump_games_indexed, create_request, execute_query, get_request, mark_completed, mark_failed, mark_processing,
    upsert_game_feature,
};
