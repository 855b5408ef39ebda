use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(20).connect(database_url).await
}

/// Apply the full feature-store schema inline, idempotent across restarts.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS indexing_requests (
    id             TEXT PRIMARY KEY,
    player         TEXT NOT NULL,
    platform       TEXT NOT NULL,
    start_month    TEXT NOT NULL,
    end_month      TEXT NOT NULL,
    status         TEXT NOT NULL,
    created_at     TIMESTAMPTZ NOT NULL,
    updated_at     TIMESTAMPTZ NOT NULL,
    error_message  TEXT,
    games_indexed  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS game_features (
    game_url      TEXT PRIMARY KEY,
    platform      TEXT NOT NULL,
    white_username TEXT,
    black_username TEXT,
    white_elo     INTEGER,
    black_elo     INTEGER,
    time_class    TEXT,
    eco           TEXT,
    result        TEXT,
    played_at     TIMESTAMPTZ,
    num_moves     INTEGER,
    has_pin                      BOOLEAN NOT NULL DEFAULT FALSE,
    has_cross_pin                BOOLEAN NOT NULL DEFAULT FALSE,
    has_fork                     BOOLEAN NOT NULL DEFAULT FALSE,
    has_skewer                   BOOLEAN NOT NULL DEFAULT FALSE,
    has_discovered_attack        BOOLEAN NOT NULL DEFAULT FALSE,
    has_check                    BOOLEAN NOT NULL DEFAULT FALSE,
    has_checkmate                BOOLEAN NOT NULL DEFAULT FALSE,
    has_promotion                BOOLEAN NOT NULL DEFAULT FALSE,
    has_promotion_with_check     BOOLEAN NOT NULL DEFAULT FALSE,
    has_promotion_with_checkmate BOOLEAN NOT NULL DEFAULT FALSE,
    motifs_json   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_game_features_played_at ON game_features (played_at DESC);

-- Normalized occurrences, queried only through motif(...) in ChessQL.
CREATE TABLE IF NOT EXISTS motif_occurrences (
    game_url       TEXT NOT NULL,
    ply            INTEGER NOT NULL,
    motif          TEXT NOT NULL,
    move_number    INTEGER NOT NULL,
    side           TEXT NOT NULL,
    attacker       TEXT NOT NULL DEFAULT '',
    target         TEXT,
    is_discovered  BOOLEAN,
    is_mate        BOOLEAN,
    PRIMARY KEY (game_url, ply, motif, attacker)
);

CREATE INDEX IF NOT EXISTS idx_motif_occurrences_motif ON motif_occurrences (motif);
"#;
