//! Skewer detector (spec §4.5).

use chess_core::board::{is_sliding_attacker, piece_letter, square_name, QUEEN_DIRECTIONS};
use chess_core::{Board, Motif, MotifOccurrence, Position, Side};

/// SKEWER occurrences for the side that just moved.
pub fn detect_skewers(game_url: &str, board: &Board, position: &Position) -> Vec<MotifOccurrence> {
    let attacker_is_white = !position.white_to_move;
    let mut out = Vec::new();

    for (from, piece) in board.occupied() {
        if (piece > 0) != attacker_is_white {
            continue;
        }

        for dir in QUEEN_DIRECTIONS {
            if !is_sliding_attacker(piece, dir) {
                continue;
            }

            let Some((front_sq, front_piece)) = board.first_occupied_along(from, dir) else {
                continue;
            };
            if (front_piece > 0) == attacker_is_white {
                continue; // front must be an enemy piece
            }

            let Some((back_sq, back_piece)) = board.first_occupied_along(front_sq, dir) else {
                continue;
            };
            if (back_piece > 0) == attacker_is_white {
                continue; // back must be an enemy piece
            }

            if front_piece.unsigned_abs() <= back_piece.unsigned_abs() {
                continue;
            }

            let side = if attacker_is_white { Side::White } else { Side::Black };
            out.push(MotifOccurrence {
                game_url: game_url.to_string(),
                ply: position.ply,
                motif: Motif::Skewer,
                move_number: position.move_number,
                side,
                description: format!(
                    "{} on {} skewers {} on {} to {} on {}",
                    piece_letter(piece),
                    square_name(from),
                    piece_letter(front_piece),
                    square_name(front_sq),
                    piece_letter(back_piece),
                    square_name(back_sq),
                ),
                attacker: Some(format!("{}{}", piece_letter(piece), square_name(from))),
                target: Some(format!(
                    "{}{}",
                    piece_letter(front_piece),
                    square_name(front_sq)
                )),
                moved_piece: None,
                is_discovered: None,
                is_mate: None,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::{PAWN, QUEEN, ROOK};

    fn board_with(pieces: &[((usize, usize), i8)]) -> Board {
        let mut grid = [[0i8; 8]; 8];
        for &(sq, p) in pieces {
            grid[sq.0][sq.1] = p;
        }
        let rows: Vec<String> = grid
            .iter()
            .map(|row| {
                let mut rank = String::new();
                let mut empties = 0;
                for &cell in row {
                    if cell == 0 {
                        empties += 1;
                        continue;
                    }
                    if empties > 0 {
                        rank.push_str(&empties.to_string());
                        empties = 0;
                    }
                    rank.push(piece_letter(cell));
                }
                if empties > 0 {
                    rank.push_str(&empties.to_string());
                }
                rank
            })
            .collect();
        Board::from_fen_placement(&rows.join("/")).unwrap()
    }

    fn pos() -> Position {
        Position {
            move_number: 14,
            // White rook is the attacker, so white must have just moved.
            white_to_move: false,
            fen: String::new(),
            ply: 27,
            san: None,
        }
    }

    #[test]
    fn rook_skewers_queen_in_front_of_pawn_s4() {
        let board = board_with(&[((4, 0), ROOK), ((4, 3), -QUEEN), ((4, 5), -PAWN)]);
        let occs = detect_skewers("g1", &board, &pos());
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].target.as_deref(), Some("qd4"));
    }

    #[test]
    fn value_ordering_prevents_false_skewer() {
        // Pawn in front of queen: 1 > 5 is false, no skewer.
        let board = board_with(&[((4, 0), ROOK), ((4, 3), -PAWN), ((4, 5), -QUEEN)]);
        assert!(detect_skewers("g1", &board, &pos()).is_empty());
    }
}
