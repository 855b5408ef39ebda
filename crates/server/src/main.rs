mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use analysis_worker::{channel, ChessComFetcher, PgnReplayer, Worker, WorkerConfig};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    let worker_config = WorkerConfig::load()?;

    tracing::info!("connecting to database...");
    let pool = feature_store::create_pool(&config.database_url).await?;

    tracing::info!("running schema migrations...");
    feature_store::run_migrations(&pool).await?;

    let (index_sender, index_receiver) = channel(config.queue_capacity);

    let fetcher = Arc::new(ChessComFetcher::new(&worker_config.chess_com_user_agent));
    let replayer = Arc::new(PgnReplayer);
    let worker = Worker::new(pool.clone(), fetcher, replayer, worker_config);

    tokio::spawn(async move {
        worker.run(index_receiver).await;
    });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let state = AppState { pool, index_sender };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/v1/index", post(routes::index::create_index_request))
        .route("/v1/index/{id}", get(routes::index::get_index_request))
        .route("/v1/query", post(routes::query::run_query))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
