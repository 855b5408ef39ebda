//! Tactical motif detectors and the feature extractor that drives them.
//!
//! Each detector is a pure function of one (or two, for discovered
//! attacks) positions and returns the `MotifOccurrence`s it finds.
//! `extractor::extract_features` runs the full battery over a game's
//! position sequence and aggregates the result into `GameFeatures`.

pub mod attacks;
pub mod derived;
pub mod discovered;
pub mod error;
pub mod extractor;
pub mod fork;
pub mod pin;
pub mod skewer;

pub use error::ExtractError;
pub use extractor::extract_features;
