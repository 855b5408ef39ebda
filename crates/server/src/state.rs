use analysis_worker::IndexSender;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub index_sender: IndexSender,
}
