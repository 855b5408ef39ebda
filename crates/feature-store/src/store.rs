use chrono::Utc;
use chessql::QueryParam;
use sqlx::{PgPool, Row};

use crate::error::StoreError;
use crate::models::{GameFeatureProjection, GameFeatureRow, IndexingRequest, IndexingStatus};

/// Insert a fresh `IndexingRequest` in status PENDING.
pub async fn create_request(
    pool: &PgPool,
    id: &str,
    player: &str,
    platform: &str,
    start_month: &str,
    end_month: &str,
) -> Result<(), StoreError> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO indexing_requests (id, player, platform, start_month, end_month, status, created_at, updated_at, games_indexed)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $7, 0)",
    )
    .bind(id)
    .bind(player)
    .bind(platform)
    .bind(start_month)
    .bind(end_month)
    .bind(IndexingStatus::Pending.as_str())
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_request(pool: &PgPool, id: &str) -> Result<IndexingRequest, StoreError> {
    let row = sqlx::query(
        "SELECT id, player, platform, start_month, end_month, status, created_at, updated_at, error_message, games_indexed
         FROM indexing_requests WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    Ok(IndexingRequest {
        id: row.try_get("id")?,
        player: row.try_get("player")?,
        platform: row.try_get("platform")?,
        start_month: row.try_get("start_month")?,
        end_month: row.try_get("end_month")?,
        status: IndexingStatus::parse(row.try_get::<String, _>("status")?.as_str())
            .unwrap_or(IndexingStatus::Failed),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        error_message: row.try_get("error_message")?,
        games_indexed: row.try_get("games_indexed")?,
    })
}

/// PENDING → PROCESSING (spec §4.9), atomic with the `updated_at` bump.
pub async fn mark_processing(pool: &PgPool, id: &str) -> Result<(), StoreError> {
    set_status(pool, id, IndexingStatus::Processing, None).await
}

pub async fn mark_completed(pool: &PgPool, id: &str) -> Result<(), StoreError> {
    set_status(pool, id, IndexingStatus::Completed, None).await
}

pub async fn mark_failed(pool: &PgPool, id: &str, error_message: &str) -> Result<(), StoreError> {
    set_status(pool, id, IndexingStatus::Failed, Some(error_message)).await
}

async fn set_status(
    pool: &PgPool,
    id: &str,
    status: IndexingStatus,
    error_message: Option<&str>,
) -> Result<(), StoreError> {
    sqlx::query(
        "UPDATE indexing_requests SET status = $1, updated_at = $2, error_message = COALESCE($3, error_message)
         WHERE id = $4",
    )
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn bump_games_indexed(pool: &PgPool, id: &str, by: i32) -> Result<(), StoreError> {
    sqlx::query("UPDATE indexing_requests SET games_indexed = games_indexed + $1, updated_at = $2 WHERE id = $3")
        .bind(by)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Idempotent insert of a game's features (spec §4.8): `ON CONFLICT
/// (game_url) DO NOTHING` so re-indexing never duplicates rows.
pub async fn upsert_game_feature(pool: &PgPool, row: &GameFeatureRow) -> Result<(), StoreError> {
    let motifs_json = row.motifs_json().to_string();
    use chess_core::Motif;

    sqlx::query(
        r#"INSERT INTO game_features (
            game_url, platform, white_username, black_username, white_elo, black_elo,
            time_class, eco, result, played_at, num_moves,
            has_pin, has_cross_pin, has_fork, has_skewer, has_discovered_attack,
            has_check, has_checkmate, has_promotion, has_promotion_with_check,
            has_promotion_with_checkmate, motifs_json
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
        ON CONFLICT (game_url) DO NOTHING"#,
    )
    .bind(&row.game_url)
    .bind(&row.platform)
    .bind(&row.white_username)
    .bind(&row.black_username)
    .bind(row.white_elo)
    .bind(row.black_elo)
    .bind(&row.time_class)
    .bind(&row.eco)
    .bind(&row.result)
    .bind(row.played_at)
    .bind(row.num_moves)
    .bind(row.has(Motif::Pin))
    .bind(row.has(Motif::CrossPin))
    .bind(row.has(Motif::Fork))
    .bind(row.has(Motif::Skewer))
    .bind(row.has(Motif::DiscoveredAttack))
    .bind(row.has(Motif::Check))
    .bind(row.has(Motif::Checkmate))
    .bind(row.has(Motif::Promotion))
    .bind(row.has(Motif::PromotionWithCheck))
    .bind(row.has(Motif::PromotionWithCheckmate))
    .bind(&motifs_json)
    .execute(pool)
    .await?;

    for occurrence in &row.features.occurrences {
        sqlx::query(
            r#"INSERT INTO motif_occurrences (game_url, ply, motif, move_number, side, attacker, target, is_discovered, is_mate)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT (game_url, ply, motif, attacker) DO NOTHING"#,
        )
        .bind(&row.game_url)
        .bind(occurrence.ply as i32)
        .bind(occurrence.motif.as_str())
        .bind(occurrence.move_number as i32)
        .bind(occurrence.side.as_str())
        .bind(occurrence.attacker.clone().unwrap_or_default())
        .bind(&occurrence.target)
        .bind(occurrence.is_discovered)
        .bind(occurrence.is_mate)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Run a compiled ChessQL WHERE fragment against `game_features` (spec
/// §4.12's full query shape), appending `LIMIT`/`OFFSET`.
pub async fn execute_query(
    pool: &PgPool,
    sql_fragment: &str,
    params: &[QueryParam],
    limit: i64,
    offset: i64,
) -> Result<Vec<GameFeatureProjection>, StoreError> {
    if !(1..=1000).contains(&limit) {
        return Err(StoreError::InvalidArgument(format!("limit must be in 1..=1000, got {limit}")));
    }
    if offset < 0 {
        return Err(StoreError::InvalidArgument(format!("offset must be >= 0, got {offset}")));
    }

    let positional = positional_placeholders(sql_fragment, params.len());
    let sql = format!(
        "SELECT g.* FROM game_features g WHERE {positional} ORDER BY g.played_at DESC, g.game_url LIMIT ${} OFFSET ${}",
        params.len() + 1,
        params.len() + 2,
    );

    let mut query = sqlx::query_as::<_, GameFeatureProjection>(&sql);
    for param in params {
        query = match param {
            QueryParam::Int(n) => query.bind(n),
            QueryParam::Str(s) => query.bind(s),
        };
    }
    query = query.bind(limit).bind(offset);

    Ok(query.fetch_all(pool).await?)
}

/// Rewrite the compiler's `?` placeholders into Postgres's `$N` form.
fn positional_placeholders(fragment: &str, _param_count: usize) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut n = 0usize;
    for c in fragment.chars() {
        if c == '?' {
            n += 1;
            out.push_str(&format!("${n}"));
        } else {
            out.push(c);
        }
    }
    out
}
