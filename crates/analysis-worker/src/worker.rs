//! Indexing worker: drains `IndexMessage`s and drives the
//! PENDING → PROCESSING → COMPLETED|FAILED state machine (spec §4.9).

use std::sync::Arc;

use feature_store::GameFeatureRow;
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::config::WorkerConfig;
use crate::error::IngestError;
use crate::fetcher::PlatformFetcher;
use crate::queue::{IndexMessage, IndexReceiver};
use crate::replayer::Replayer;

pub struct Worker {
    pool: PgPool,
    fetcher: Arc<dyn PlatformFetcher>,
    replayer: Arc<dyn Replayer>,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(pool: PgPool, fetcher: Arc<dyn PlatformFetcher>, replayer: Arc<dyn Replayer>, config: WorkerConfig) -> Worker {
        Worker { pool, fetcher, replayer, config }
    }

    /// Drain `receiver` until the channel closes, running each request
    /// to completion before dequeuing the next (spec §5: single-threaded
    /// per request within the worker).
    pub async fn run(&self, mut receiver: IndexReceiver) {
        info!("indexing worker started");
        while let Some(message) = receiver.recv().await {
            self.process_request(message).await;
        }
        info!("indexing worker queue closed, shutting down");
    }

    async fn process_request(&self, message: IndexMessage) {
        let IndexMessage { request_id, player, platform, start_month, end_month } = message;

        if let Err(e) = feature_store::mark_processing(&self.pool, &request_id).await {
            error!(request_id = %request_id, error = %e, "failed to transition request to PROCESSING");
            return;
        }
        info!(request_id = %request_id, %player, %platform, "request moved to PROCESSING");

        match self.index_months(&request_id, &player, &platform, &start_month, &end_month).await {
            Ok(()) => {
                if let Err(e) = feature_store::mark_completed(&self.pool, &request_id).await {
                    error!(request_id = %request_id, error = %e, "failed to transition request to COMPLETED");
                }
                info!(request_id = %request_id, "request COMPLETED");
            }
            Err(e) => {
                let message = e.to_string();
                if let Err(store_err) = feature_store::mark_failed(&self.pool, &request_id, &message).await {
                    error!(request_id = %request_id, error = %store_err, "failed to record FAILED status");
                }
                error!(request_id = %request_id, error = %message, "request FAILED");
            }
        }
    }

    async fn index_months(
        &self,
        request_id: &str,
        player: &str,
        platform: &str,
        start_month: &str,
        end_month: &str,
    ) -> Result<(), IngestError> {
        let mut games_since_flush = 0u32;

        for month in months_in_range(start_month, end_month) {
            let games = self.fetcher.fetch_month(player, platform, &month).await?;
            info!(request_id = %request_id, %month, count = games.len(), "fetched month");

            for game in games {
                match self.index_one_game(platform, &game).await {
                    Ok(()) => {
                        games_since_flush += 1;
                        if games_since_flush >= self.config.flush_every_n_games {
                            feature_store::bump_games_indexed(&self.pool, request_id, games_since_flush as i32).await?;
                            games_since_flush = 0;
                        }
                    }
                    Err(e) => {
                        // Per-game error: logged and swallowed (spec §4.9).
                        warn!(request_id = %request_id, game_url = %game.game_url, error = %e, "skipping game after per-game error");
                    }
                }
            }
        }

        if games_since_flush > 0 {
            feature_store::bump_games_indexed(&self.pool, request_id, games_since_flush as i32).await?;
        }
        Ok(())
    }

    async fn index_one_game(&self, platform: &str, game: &feature_store::PlatformGame) -> Result<(), IngestError> {
        let (_, positions) = self.replayer.parse_game(&game.pgn)?;
        let features = chess_analyzers::extract_features(&game.game_url, &positions)?;
        let row = GameFeatureRow::from_platform_game(platform, game, features);
        feature_store::upsert_game_feature(&self.pool, &row).await.map_err(IngestError::from)
    }
}

/// Inclusive `"YYYY-MM"` month range, ascending.
fn months_in_range(start_month: &str, end_month: &str) -> Vec<String> {
    let Some((start_y, start_m)) = parse_year_month(start_month) else {
        return Vec::new();
    };
    let Some((end_y, end_m)) = parse_year_month(end_month) else {
        return Vec::new();
    };

    let mut months = Vec::new();
    let (mut y, mut m) = (start_y, start_m);
    while (y, m) <= (end_y, end_m) {
        months.push(format!("{y:04}-{m:02}"));
        m += 1;
        if m > 12 {
            m = 1;
            y += 1;
        }
    }
    months
}

fn parse_year_month(s: &str) -> Option<(i32, u32)> {
    let (y, m) = s.split_once('-')?;
    Some((y.parse().ok()?, m.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_in_range_is_inclusive_and_crosses_year_boundary() {
        let months = months_in_range("2023-11", "2024-02");
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn single_month_range() {
        assert_eq!(months_in_range("2024-03", "2024-03"), vec!["2024-03"]);
    }
}
