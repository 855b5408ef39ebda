//! Query API (spec §6.1 / §6): runs the ChessQL pipeline and executes
//! the compiled SQL against the feature store. Response shape modeled
//! on the sibling `motif_query` service's `QueryResponse`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequestBody {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Serialize)]
pub struct QueryResponseBody {
    pub rows: Vec<feature_store::GameFeatureProjection>,
    pub row_count: usize,
}

pub async fn run_query(
    State(state): State<AppState>,
    Json(body): Json<QueryRequestBody>,
) -> Result<Json<QueryResponseBody>, AppError> {
    let (sql_fragment, params) = chessql::compile_query(&body.query)?;
    let rows = feature_store::execute_query(&state.pool, &sql_fragment, &params, body.limit, body.offset).await?;
    let row_count = rows.len();
    Ok(Json(QueryResponseBody { rows, row_count }))
}
