//! Shared data model (spec §3): positions, motifs, occurrences, and the
//! per-game feature aggregate the extractor produces.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single snapshot produced by an external replayer after some ply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub move_number: u32,
    pub white_to_move: bool,
    pub fen: String,
    pub ply: u32,
    /// SAN of the move that produced this position (`None` for ply 0).
    /// Its suffix (`+`, `#`, `=Q` etc.) is the sole source of the
    /// check/checkmate/promotion family of motifs (spec §4.7) — these
    /// are move-metadata, not board-scan results.
    pub san: Option<String>,
}

/// A tactical motif kind (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Motif {
    Pin,
    CrossPin,
    Fork,
    Skewer,
    DiscoveredAttack,
    Check,
    Checkmate,
    Promotion,
    PromotionWithCheck,
    PromotionWithCheckmate,
}

impl Motif {
    pub const ALL: [Motif; 10] = [
        Motif::Pin,
        Motif::CrossPin,
        Motif::Fork,
        Motif::Skewer,
        Motif::DiscoveredAttack,
        Motif::Check,
        Motif::Checkmate,
        Motif::Promotion,
        Motif::PromotionWithCheck,
        Motif::PromotionWithCheckmate,
    ];

    /// The stable name used in ChessQL, SQL `motif` columns, and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Motif::Pin => "PIN",
            Motif::CrossPin => "CROSS_PIN",
            Motif::Fork => "FORK",
            Motif::Skewer => "SKEWER",
            Motif::DiscoveredAttack => "DISCOVERED_ATTACK",
            Motif::Check => "CHECK",
            Motif::Checkmate => "CHECKMATE",
            Motif::Promotion => "PROMOTION",
            Motif::PromotionWithCheck => "PROMOTION_WITH_CHECK",
            Motif::PromotionWithCheckmate => "PROMOTION_WITH_CHECKMATE",
        }
    }

    pub fn parse(name: &str) -> Option<Motif> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// The feature-row boolean column this motif maps to (spec §3).
    pub fn flag_column(&self) -> &'static str {
        match self {
            Motif::Pin => "has_pin",
            Motif::CrossPin => "has_cross_pin",
            Motif::Fork => "has_fork",
            Motif::Skewer => "has_skewer",
            Motif::DiscoveredAttack => "has_discovered_attack",
            Motif::Check => "has_check",
            Motif::Checkmate => "has_checkmate",
            Motif::Promotion => "has_promotion",
            Motif::PromotionWithCheck => "has_promotion_with_check",
            Motif::PromotionWithCheckmate => "has_promotion_with_checkmate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn from_white_to_move(white_to_move_after: bool) -> Side {
        // The side that just moved is the side NOT to move now.
        if white_to_move_after {
            Side::Black
        } else {
            Side::White
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

/// One firing of a motif in one position of one game (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotifOccurrence {
    pub game_url: String,
    pub ply: u32,
    pub motif: Motif,
    pub move_number: u32,
    pub side: Side,
    pub description: String,
    pub attacker: Option<String>,
    pub target: Option<String>,
    pub moved_piece: Option<String>,
    pub is_discovered: Option<bool>,
    pub is_mate: Option<bool>,
}

/// Per-game aggregate emitted by the feature extractor (spec §3, §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameFeatures {
    pub num_moves: u32,
    pub motifs: BTreeSet<Motif>,
    pub occurrences: Vec<MotifOccurrence>,
}

impl GameFeatures {
    pub fn has(&self, motif: Motif) -> bool {
        self.motifs.contains(&motif)
    }
}
