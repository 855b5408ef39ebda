//! Ingest API (spec §6.1 / §6).

use axum::{extract::{Path, State}, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IndexRequestBody {
    pub player: String,
    pub platform: String,
    pub start_month: String,
    pub end_month: String,
}

#[derive(Debug, Serialize)]
pub struct IndexRequestCreated {
    pub id: String,
}

pub async fn create_index_request(
    State(state): State<AppState>,
    Json(body): Json<IndexRequestBody>,
) -> Result<Json<IndexRequestCreated>, AppError> {
    let id = uuid::Uuid::new_v4().to_string();

    feature_store::create_request(&state.pool, &id, &body.player, &body.platform, &body.start_month, &body.end_month)
        .await?;

    let message = analysis_worker::IndexMessage {
        request_id: id.clone(),
        player: body.player,
        platform: body.platform,
        start_month: body.start_month,
        end_month: body.end_month,
    };

    // Fire-and-forget: the queue accepts the message, the caller gets
    // the already-created request id back immediately (spec §6).
    state
        .index_sender
        .send(message)
        .await
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("queue closed: {e}")))?;

    Ok(Json(IndexRequestCreated { id }))
}

pub async fn get_index_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<feature_store::IndexingRequest>, AppError> {
    let request = feature_store::get_request(&state.pool, &id).await?;
    Ok(Json(request))
}
