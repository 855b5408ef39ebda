//! Board model and shared data types for the motif indexing core.
//!
//! This crate owns the primitive, allocation-light board representation
//! (spec §4.1) and the data model shared by the detectors, the feature
//! extractor, and the ChessQL compiler (spec §3). It has no knowledge of
//! PGN text, HTTP, or SQL — those live in `chess-analyzers`, `indexer`,
//! and `feature-store` respectively.

pub mod board;
pub mod types;

pub use board::{Board, BoardError, Square};
pub use types::{GameFeatures, Motif, MotifOccurrence, Position, Side};
