use chess_core::BoardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("position {ply}: invalid board placement: {source}")]
    InvalidPosition { ply: u32, source: BoardError },
}
