pub mod config;
pub mod error;
pub mod fetcher;
pub mod queue;
pub mod replayer;
pub mod worker;

pub use config::WorkerConfig;
pub use error::{ConfigError, IngestError};
pub use fetcher::{ChessComFetcher, PlatformFetcher};
pub use queue::{channel, IndexMessage, IndexReceiver, IndexSender};
pub use replayer::{PgnReplayer, Replayer};
pub use worker::Worker;
