//! Per-piece attack-square computation shared by the fork and skewer
//! detectors (spec §4.4, §4.5).

use chess_core::board::{
    BISHOP, DIAGONAL_DIRECTIONS, KING, KNIGHT, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS, PAWN, QUEEN,
    QUEEN_DIRECTIONS, ROOK,
};
use chess_core::{Board, Square};

/// Squares the piece on `from` attacks, per spec §4.4:
/// knight/king use fixed offsets, pawns attack the two diagonal-forward
/// squares, and sliding pieces stop at (and include) the first occupied
/// square along each compatible direction.
pub fn attacks_from(board: &Board, from: Square) -> Vec<Square> {
    let piece = board.get(from);
    if piece == 0 {
        return Vec::new();
    }
    let white = piece > 0;
    match piece.unsigned_abs() as i8 {
        PAWN => pawn_attacks(from, white),
        KNIGHT => offsets(from, &KNIGHT_OFFSETS),
        KING => offsets(from, &QUEEN_DIRECTIONS),
        BISHOP => slide(board, from, &DIAGONAL_DIRECTIONS),
        ROOK => slide(board, from, &ORTHOGONAL_DIRECTIONS),
        QUEEN => slide(board, from, &QUEEN_DIRECTIONS),
        _ => Vec::new(),
    }
}

fn offsets(from: Square, deltas: &[(i32, i32)]) -> Vec<Square> {
    deltas
        .iter()
        .filter_map(|&(dr, dc)| {
            let row = from.0 as i32 + dr;
            let col = from.1 as i32 + dc;
            Board::in_bounds(row, col).then_some((row as usize, col as usize))
        })
        .collect()
}

fn slide(board: &Board, from: Square, dirs: &[(i32, i32)]) -> Vec<Square> {
    dirs.iter().flat_map(|&dir| board.slide_attacks(from, dir)).collect()
}

/// Pawn attack squares are the two diagonal-forward squares, "forward"
/// meaning toward the opponent.
fn pawn_attacks(from: Square, white: bool) -> Vec<Square> {
    let dr: i32 = if white { -1 } else { 1 };
    [-1i32, 1]
        .into_iter()
        .filter_map(|dc| {
            let row = from.0 as i32 + dr;
            let col = from.1 as i32 + dc;
            Board::in_bounds(row, col).then_some((row as usize, col as usize))
        })
        .collect()
}
