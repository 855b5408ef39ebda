//! Server configuration from environment variables (spec §6.5).

use std::env;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Config, AppError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| AppError::Config("DATABASE_URL not set".to_string()))?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .map(|v| v.parse().map_err(|_| AppError::Config("PORT is not a valid port number".to_string())))
            .transpose()?
            .unwrap_or(8000);
        let queue_capacity = env::var("QUEUE_CAPACITY")
            .ok()
            .map(|v| v.parse().map_err(|_| AppError::Config("QUEUE_CAPACITY is not a valid integer".to_string())))
            .transpose()?
            .unwrap_or(256);

        Ok(Config { database_url, host, port, queue_capacity })
    }
}
