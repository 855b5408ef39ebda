//! Discovered attack detector (spec §4.6). Operates on a sliding window
//! of two consecutive positions — never holds references to positions
//! already processed (spec §9).

use chess_core::board::{is_sliding_attacker, piece_letter, square_name, Square, QUEEN_DIRECTIONS};
use chess_core::{Board, Motif, MotifOccurrence, Position, Side};

fn opposite(dir: (i32, i32)) -> (i32, i32) {
    (-dir.0, -dir.1)
}

/// The moved piece's destination square in `after`, found by matching
/// its (unchanged) signed value. Promotions change the value, so no
/// match is found and the destination is unknown (spec §4.6).
fn find_destination(after: &Board, vacated: Square, moved_value: i8) -> Option<Square> {
    after
        .occupied()
        .find(|&(sq, value)| sq != vacated && value == moved_value)
        .map(|(sq, _)| sq)
}

/// DISCOVERED_ATTACK occurrences revealed by the move from `before` to
/// `after`. `after` is the position to annotate the occurrence with.
pub fn detect_discovered_attacks(
    game_url: &str,
    before: &Board,
    after: &Board,
    position: &Position,
) -> Vec<MotifOccurrence> {
    let mover_is_white = !position.white_to_move;
    let mut out = Vec::new();

    let vacated_squares: Vec<Square> = before
        .occupied()
        .filter(|&(sq, piece)| (piece > 0) == mover_is_white && after.get(sq) == 0)
        .map(|(sq, _)| sq)
        .collect();

    for vacated in vacated_squares {
        let moved_value = before.get(vacated);
        let destination = find_destination(after, vacated, moved_value);
        let to_label = destination.map(square_name).unwrap_or_else(|| "??".to_string());

        for dir in QUEEN_DIRECTIONS {
            let Some((attacker_sq, attacker_piece)) =
                after.first_occupied_along(vacated, opposite(dir))
            else {
                continue;
            };
            if (attacker_piece > 0) != mover_is_white {
                continue;
            }
            if Some(attacker_sq) == destination {
                continue; // the moved piece's new square is not the revealer
            }
            if !is_sliding_attacker(attacker_piece, dir) {
                continue;
            }

            let Some((target_sq, target_piece)) = after.first_occupied_along(vacated, dir) else {
                continue;
            };
            if (target_piece > 0) == mover_is_white {
                continue; // target must be an enemy piece
            }

            let side = if mover_is_white { Side::White } else { Side::Black };
            out.push(MotifOccurrence {
                game_url: game_url.to_string(),
                ply: position.ply,
                motif: Motif::DiscoveredAttack,
                move_number: position.move_number,
                side,
                description: format!(
                    "{} {}-{} reveals {} on {} attacking {} on {}",
                    piece_letter(moved_value),
                    square_name(vacated),
                    to_label,
                    piece_letter(attacker_piece),
                    square_name(attacker_sq),
                    piece_letter(target_piece),
                    square_name(target_sq),
                ),
                attacker: Some(format!(
                    "{}{}",
                    piece_letter(attacker_piece),
                    square_name(attacker_sq)
                )),
                target: Some(format!("{}{}", piece_letter(target_piece), square_name(target_sq))),
                moved_piece: Some(format!(
                    "{}{}{}",
                    piece_letter(moved_value),
                    square_name(vacated),
                    to_label
                )),
                is_discovered: Some(true),
                is_mate: None,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board::KNIGHT;

    fn board_with(pieces: &[(Square, i8)]) -> Board {
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
            move_number: 1,
            white_to_move: false,
            fen: String::new(),
            ply: 1,
            san: None,
        }
    }

    #[test]
    fn knight_move_discovers_rook_attack_on_rook() {
        // White rook on e1, knight on e3 hopping to f5, unmasks the
        // e-file against a black rook on e8.
        let before = board_with(&[((7, 4), chess_core::board::ROOK), ((5, 4), KNIGHT), ((0, 4), -chess_core::board::ROOK)]);
        let after = board_with(&[((7, 4), chess_core::board::ROOK), ((3, 5), KNIGHT), ((0, 4), -chess_core::board::ROOK)]);

        let occs = detect_discovered_attacks("g1", &before, &after, &pos());
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].attacker.as_deref(), Some("Re1"));
        assert_eq!(occs[0].target.as_deref(), Some("re8"));
    }

    #[test]
    fn move_with_no_revealed_line_yields_nothing() {
        let before = board_with(&[((7, 4), KNIGHT)]);
        let after = board_with(&[((5, 3), KNIGHT)]);
        assert!(detect_discovered_attacks("g1", &before, &after, &pos()).is_empty());
    }
}
