//! Row types the store reads and writes (spec §6 schema).

use chrono::{DateTime, Utc};
use chess_core::{GameFeatures, Motif};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl IndexingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexingStatus::Pending => "PENDING",
            IndexingStatus::Processing => "PROCESSING",
            IndexingStatus::Completed => "COMPLETED",
            IndexingStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<IndexingStatus> {
        match s {
            "PENDING" => Some(IndexingStatus::Pending),
            "PROCESSING" => Some(IndexingStatus::Processing),
            "COMPLETED" => Some(IndexingStatus::Completed),
            "FAILED" => Some(IndexingStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingRequest {
    pub id: String,
    pub player: String,
    pub platform: String,
    pub start_month: String,
    pub end_month: String,
    pub status: IndexingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub error_message: Option<String>,
    pub games_indexed: i32,
}

/// A game's metadata as seen from the platform fetcher, prior to
/// running the extractor over its positions.
#[derive(Debug, Clone)]
pub struct PlatformGame {
    pub game_url: String,
    pub white: String,
    pub black: String,
    pub white_elo: Option<i32>,
    pub black_elo: Option<i32>,
    pub time_class: String,
    pub eco: Option<String>,
    pub result: String,
    pub played_at: Option<DateTime<Utc>>,
    pub pgn: String,
}

/// The denormalized feature row (spec §6 `game_features`), built from a
/// `PlatformGame`'s metadata and the extractor's `GameFeatures`.
#[derive(Debug, Clone)]
pub struct GameFeatureRow {
    pub game_url: String,
    pub platform: String,
    pub white_username: Option<String>,
    pub black_username: Option<String>,
    pub white_elo: Option<i32>,
    pub black_elo: Option<i32>,
    pub time_class: Option<String>,
    pub eco: Option<String>,
    pub result: Option<String>,
    pub played_at: Option<DateTime<Utc>>,
    pub num_moves: i32,
    pub features: GameFeatures,
}

impl GameFeatureRow {
    pub fn from_platform_game(platform: &str, game: &PlatformGame, features: GameFeatures) -> GameFeatureRow {
        GameFeatureRow {
            game_url: game.game_url.clone(),
            platform: platform.to_string(),
            white_username: Some(game.white.clone()),
            black_username: Some(game.black.clone()),
            white_elo: game.white_elo,
            black_elo: game.black_elo,
            time_class: Some(game.time_class.clone()),
            eco: game.eco.clone(),
            result: Some(game.result.clone()),
            played_at: game.played_at,
            num_moves: features.num_moves as i32,
            features,
        }
    }

    pub fn has(&self, motif: Motif) -> bool {
        self.features.has(motif)
    }

    pub fn motifs_json(&self) -> serde_json::Value {
        serde_json::json!({
            "motifs": self.features.motifs,
            "occurrences": self.features.occurrences,
        })
    }
}

/// A projected row returned by `executeQuery` (spec §6 `SELECT g.*`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameFeatureProjection {
    pub game_url: String,
    pub platform: String,
    pub white_username: Option<String>,
    pub black_username: Option<String>,
    pub white_elo: Option<i32>,
    pub black_elo: Option<i32>,
    pub time_class: Option<String>,
    pub eco: Option<String>,
    pub result: Option<String>,
    pub played_at: Option<DateTime<Utc>>,
    pub num_moves: Option<i32>,
    pub has_pin: bool,
    pub has_cross_pin: bool,
    pub has_fork: bool,
    pub has_skewer: bool,
    pub has_discovered_attack: bool,
    pub has_check: bool,
    pub has_checkmate: bool,
    pub has_promotion: bool,
    pub has_promotion_with_check: bool,
    pub has_promotion_with_checkmate: bool,
    pub motifs_json: String,
}
