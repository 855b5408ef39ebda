//! Platform fetcher (spec §6.3): fetches a month's game list from an
//! external platform. The default implementation targets chess.com,
//! grounded in the donor's `clients/chess_com.rs` (same endpoint shape,
//! same per-request rate-limit sleep, same rated/standard-rules filter),
//! extended to surface full `PlatformGame` metadata instead of bare PGN.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feature_store::PlatformGame;
use serde_json::Value;

use crate::error::IngestError;

#[async_trait]
pub trait PlatformFetcher: Send + Sync {
    async fn fetch_month(&self, player: &str, platform: &str, year_month: &str) -> Result<Vec<PlatformGame>, IngestError>;
}

pub struct ChessComFetcher {
    client: reqwest::Client,
}

impl ChessComFetcher {
    pub fn new(user_agent: &str) -> ChessComFetcher {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("static reqwest client config is always valid");
        ChessComFetcher { client }
    }
}

#[async_trait]
impl PlatformFetcher for ChessComFetcher {
    async fn fetch_month(&self, player: &str, platform: &str, year_month: &str) -> Result<Vec<PlatformGame>, IngestError> {
        if platform != "chess.com" {
            return Err(IngestError::FetchFailed(format!("unsupported platform: {platform}")));
        }
        let (year, month) = year_month
            .split_once('-')
            .ok_or_else(|| IngestError::FetchFailed(format!("invalid month '{year_month}', expected YYYY-MM")))?;

        let url = format!("https://api.chess.com/pub/player/{player}/games/{year}/{month}");

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IngestError::FetchFailed(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !resp.status().is_success() {
            return Err(IngestError::FetchFailed(format!("HTTP {}", resp.status())));
        }

        let data: Value = resp.json().await.map_err(|e| IngestError::FetchFailed(e.to_string()))?;
        let games = data["games"].as_array().cloned().unwrap_or_default();

        let mut results = Vec::new();
        for game in games {
            if !game.get("rated").and_then(Value::as_bool).unwrap_or(true) {
                continue;
            }
            let rules = game.get("rules").and_then(Value::as_str).unwrap_or("chess");
            if rules != "chess" {
                continue;
            }
            let Some(pgn) = game.get("pgn").and_then(Value::as_str) else {
                continue;
            };
            let Some(game_url) = game.get("url").and_then(Value::as_str) else {
                continue;
            };

            let white = &game["white"];
            let black = &game["black"];
            let played_at = game
                .get("end_time")
                .and_then(Value::as_i64)
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

            results.push(PlatformGame {
                game_url: game_url.to_string(),
                white: white.get("username").and_then(Value::as_str).unwrap_or_default().to_string(),
                black: black.get("username").and_then(Value::as_str).unwrap_or_default().to_string(),
                white_elo: white.get("rating").and_then(Value::as_i64).map(|n| n as i32),
                black_elo: black.get("rating").and_then(Value::as_i64).map(|n| n as i32),
                time_class: game.get("time_class").and_then(Value::as_str).unwrap_or("unknown").to_string(),
                eco: game.get("eco").and_then(Value::as_str).map(String::from),
                result: white.get("result").and_then(Value::as_str).unwrap_or_default().to_string(),
                played_at,
                pgn: pgn.to_string(),
            });
        }

        Ok(results)
    }
}
