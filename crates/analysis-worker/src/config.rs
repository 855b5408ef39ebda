//! Worker configuration from environment variables (spec §6.5).

use std::env;

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Bounded-queue depth; 0 means unbounded (spec §6).
    pub queue_capacity: usize,
    /// How often to update `games_indexed`; default 10 (spec §6).
    pub flush_every_n_games: u32,
    pub chess_com_user_agent: String,
}

impl WorkerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let queue_capacity = match env::var("QUEUE_CAPACITY") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("QUEUE_CAPACITY", "non-negative integer"))?,
            Err(_) => 256,
        };

        let flush_every_n_games = match env::var("WORKER_FLUSH_EVERY_N_GAMES") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WORKER_FLUSH_EVERY_N_GAMES", "positive integer"))?,
            Err(_) => 10,
        };

        let chess_com_user_agent =
            env::var("CHESS_COM_USER_AGENT").unwrap_or_else(|_| "chess-motif-indexer/0.1".to_string());

        Ok(Self {
            database_url,
            queue_capacity,
            flush_every_n_games,
            chess_com_user_agent,
        })
    }
}
