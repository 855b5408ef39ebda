//! Fork detector (spec §4.4).

use chess_core::board::{piece_letter, square_name};
use chess_core::{Board, Motif, MotifOccurrence, Position, Side};

use crate::attacks::attacks_from;

/// FORK occurrences for the side that just moved. Per spec §4.4 this
/// includes pawns: any attacker with >=2 value->=2 targets fires,
/// regardless of piece type (Open Question in spec §9 — preserved, not
/// narrowed).
pub fn detect_forks(game_url: &str, board: &Board, position: &Position) -> Vec<MotifOccurrence> {
    let attacker_is_white = !position.white_to_move;
    let mut out = Vec::new();

    for (from, piece) in board.occupied() {
        if (piece > 0) != attacker_is_white {
            continue;
        }

        let targets: Vec<_> = attacks_from(board, from)
            .into_iter()
            .filter_map(|sq| {
                let target_piece = board.get(sq);
                if target_piece == 0 || (target_piece > 0) == attacker_is_white {
                    return None;
                }
                (target_piece.unsigned_abs() >= 2).then_some((sq, target_piece))
            })
            .collect();

        if targets.len() < 2 {
            continue;
        }

        let side = if attacker_is_white { Side::White } else { Side::Black };
        let description = format!(
            "{} on {} forks {}",
            piece_letter(piece),
            square_name(from),
            targets
                .iter()
                .map(|&(sq, p)| format!("{}{}", piece_letter(p), square_name(sq)))
                .collect::<Vec<_>>()
                .join(" and ")
        );

        out.push(MotifOccurrence {
            game_url: game_url.to_string(),
            ply: position.ply,
            motif: Motif::Fork,
            move_number: position.move_number,
            side,
            description,
            attacker: Some(format!("{}{}", piece_letter(piece), square_name(from))),
            target: Some(
                targets
                    .iter()
                    .map(|&(sq, p)| format!("{}{}", piece_letter(p), square_name(sq)))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            moved_piece: None,
            is_discovered: None,
            is_mate: None,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::{KNIGHT, PAWN, QUEEN, ROOK};
    use chess_core::Board;

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

    fn pos(white_to_move: bool) -> Position {
        Position {
            move_number: 12,
            white_to_move,
            fen: String::new(),
            ply: 23,
            san: None,
        }
    }

    #[test]
    fn knight_forks_queen_and_rook_s3() {
        let board = board_with(&[((4, 3), KNIGHT), ((2, 2), -QUEEN), ((2, 4), -ROOK)]);
        // Black just moved a piece onto (2,4); it's white's turn to reply
        // to the position, so white's knight is "the side that just
        // moved"? No — per spec the attacker is the side that JUST
        // moved. Knight is white, so white must have just moved:
        // white_to_move (now) = false.
        let occs = detect_forks("g1", &board, &pos(false));
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].motif, Motif::Fork);
    }

    #[test]
    fn single_low_value_target_does_not_fork() {
        let board = board_with(&[((4, 3), KNIGHT), ((2, 2), -PAWN), ((2, 4), -ROOK)]);
        let occs = detect_forks("g1", &board, &pos(false));
        assert!(occs.is_empty());
    }
}
