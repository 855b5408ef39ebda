//! Feature extractor (spec §4.7): runs every detector over a game's full
//! position sequence and aggregates the results into `GameFeatures`.

use chess_core::{Board, GameFeatures, MotifOccurrence, Position};

use crate::derived::detect_derived_motifs;
use crate::discovered::detect_discovered_attacks;
use crate::error::ExtractError;
use crate::fork::detect_forks;
use crate::pin::{detect_cross_pins, detect_pins};
use crate::skewer::detect_skewers;

fn placement(fen: &str) -> &str {
    fen.split_whitespace().next().unwrap_or(fen)
}

fn parse_board(position: &Position) -> Result<Board, ExtractError> {
    Board::from_fen_placement(placement(&position.fen)).map_err(|source| ExtractError::InvalidPosition {
        ply: position.ply,
        source,
    })
}

/// Run the full detector battery over `positions` and produce the
/// per-game aggregate. Detectors are pure functions of one or two
/// positions (spec §4.7 step 2) and are invoked here in ply order;
/// implementations MAY parallelize this loop across positions as long
/// as the final occurrence list is sorted by `(ply, motif)` (spec §5).
pub fn extract_features(game_url: &str, positions: &[Position]) -> Result<GameFeatures, ExtractError> {
    let mut occurrences: Vec<MotifOccurrence> = Vec::new();
    let mut prev_board: Option<Board> = None;

    for position in positions {
        let board = parse_board(position)?;

        occurrences.extend(detect_pins(game_url, &board, position));
        occurrences.extend(detect_cross_pins(game_url, &board, position));
        occurrences.extend(detect_forks(game_url, &board, position));
        occurrences.extend(detect_skewers(game_url, &board, position));
        occurrences.extend(detect_derived_motifs(game_url, position));

        if let Some(before) = &prev_board {
            occurrences.extend(detect_discovered_attacks(game_url, before, &board, position));
        }

        prev_board = Some(board);
    }

    occurrences.sort_by_key(|a| (a.ply, a.motif));

    let motifs = occurrences.iter().map(|o| o.motif).collect();
    let num_moves = positions.len().saturating_sub(1) as u32;

    Ok(GameFeatures {
        num_moves,
        motifs,
        occurrences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str, ply: u32, white_to_move: bool, san: Option<&str>) -> Position {
        Position {
            move_number: ply / 2 + 1,
            white_to_move,
            fen: fen.to_string(),
            ply,
            san: san.map(str::to_string),
        }
    }

    #[test]
    fn empty_single_position_game_has_zero_moves() {
        let positions = vec![position(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            0,
            true,
            None,
        )];
        let features = extract_features("g1", &positions).unwrap();
        assert_eq!(features.num_moves, 0);
        assert!(features.occurrences.is_empty());
    }

    #[test]
    fn occurrences_are_sorted_by_ply_then_motif() {
        let positions = vec![
            position(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                0,
                true,
                None,
            ),
            position(
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                1,
                false,
                Some("e4"),
            ),
        ];
        let features = extract_features("g1", &positions).unwrap();
        let plies: Vec<u32> = features.occurrences.iter().map(|o| o.ply).collect();
        let mut sorted = plies.clone();
        sorted.sort();
        assert_eq!(plies, sorted);
    }
}
