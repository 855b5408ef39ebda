//! Replayer (spec §6.2): walks a parsed PGN mainline and emits one
//! `Position` per ply. Kept behind the `Replayer` trait so the
//! motif-detection core never depends on the PGN parsing library
//! directly, only on the `Position` sequence it produces.

use std::collections::HashMap;
use std::ops::ControlFlow;

use chess_core::Position;
use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{Chess, EnPassantMode, Position as ShakmatyPosition};

use crate::error::IngestError;

pub trait Replayer: Send + Sync {
    fn parse_game(&self, pgn: &str) -> Result<(HashMap<String, String>, Vec<Position>), IngestError>;
}

pub struct PgnReplayer;

struct ReplayState {
    board: Chess,
    positions: Vec<Position>,
    ply: u32,
}

struct MainlineVisitor;

impl Visitor for MainlineVisitor {
    type Tags = HashMap<String, String>;
    type Movetext = (HashMap<String, String>, ReplayState);
    type Output = (HashMap<String, String>, Vec<Position>);

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(HashMap::new())
    }

    fn tag(&mut self, tags: &mut Self::Tags, name: &[u8], value: RawTag<'_>) -> ControlFlow<Self::Output> {
        if let (Ok(key), Ok(value)) = (std::str::from_utf8(name), value.decode_utf8()) {
            tags.insert(key.to_string(), value.into_owned());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let board = Chess::default();
        let movetext = ReplayState {
            positions: vec![Position {
                move_number: 1,
                white_to_move: true,
                fen: Fen::from_position(&board, EnPassantMode::Legal).to_string(),
                ply: 0,
                san: None,
            }],
            board,
            ply: 0,
        };
        ControlFlow::Continue((tags, movetext))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let (_, state) = movetext;
        let Ok(mv) = san_plus.san.to_move(&state.board) else {
            return ControlFlow::Continue(());
        };
        state.board.play_unchecked(mv);
        state.ply += 1;

        state.positions.push(Position {
            move_number: state.ply / 2 + 1,
            white_to_move: state.board.turn() == shakmaty::Color::White,
            fen: Fen::from_position(&state.board, EnPassantMode::Legal).to_string(),
            ply: state.ply,
            san: Some(san_plus.to_string()),
        });
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _movetext: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        let (tags, state) = movetext;
        (tags, state.positions)
    }
}

impl Replayer for PgnReplayer {
    fn parse_game(&self, pgn: &str) -> Result<(HashMap<String, String>, Vec<Position>), IngestError> {
        let mut reader = Reader::new(pgn.as_bytes());
        let mut visitor = MainlineVisitor;
        let result = reader
            .read_game(&mut visitor)
            .map_err(|e| IngestError::PgnParseFailed(e.to_string()))?
            .ok_or_else(|| IngestError::PgnParseFailed("empty PGN".to_string()))?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_a_short_game_into_a_position_sequence() {
        let pgn = "1. e4 e5 2. Nf3 Nc6 3. Bb5 *\n";
        let (_, positions) = PgnReplayer.parse_game(pgn).unwrap();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0].ply, 0);
        assert_eq!(positions[0].san, None);
        assert_eq!(positions[5].san.as_deref(), Some("Bb5"));
    }

    #[test]
    fn check_suffix_survives_into_the_san_field() {
        let pgn = "1. f3 e5 2. g4 Qh4# *\n";
        let (_, positions) = PgnReplayer.parse_game(pgn).unwrap();
        let last = positions.last().unwrap();
        assert_eq!(last.san.as_deref(), Some("Qh4#"));
    }
}
