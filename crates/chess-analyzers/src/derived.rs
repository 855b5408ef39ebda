//! Check/checkmate and promotion family motifs (spec §4.7). These are
//! not board-scan results — they come straight from move metadata the
//! replayer exposes: SAN endings `+`, `#`, and `=X`.

use chess_core::{Motif, MotifOccurrence, Position, Side};

fn occurrence(game_url: &str, position: &Position, motif: Motif, is_mate: Option<bool>) -> MotifOccurrence {
    let side = Side::from_white_to_move(position.white_to_move);
    MotifOccurrence {
        game_url: game_url.to_string(),
        ply: position.ply,
        motif,
        move_number: position.move_number,
        side,
        description: format!(
            "{} by {} ({})",
            motif.as_str(),
            side.as_str(),
            position.san.as_deref().unwrap_or(""),
        ),
        attacker: None,
        target: None,
        moved_piece: position.san.clone(),
        is_discovered: None,
        is_mate,
    }
}

/// Derive the CHECK/CHECKMATE/PROMOTION family from `position.san`.
/// A single firing per flag (spec §9 Open Question): a promoting mate
/// like `e8=Q#` yields PROMOTION, CHECKMATE, and
/// PROMOTION_WITH_CHECKMATE, never a duplicated CHECKMATE on top.
pub fn detect_derived_motifs(game_url: &str, position: &Position) -> Vec<MotifOccurrence> {
    let Some(san) = position.san.as_deref() else {
        return Vec::new();
    };

    let is_checkmate = san.ends_with('#');
    let is_check = san.ends_with('+');
    let is_promotion = san.contains('=');

    let mut out = Vec::new();
    if is_checkmate {
        out.push(occurrence(game_url, position, Motif::Checkmate, Some(true)));
    } else if is_check {
        out.push(occurrence(game_url, position, Motif::Check, Some(false)));
    }

    if is_promotion {
        out.push(occurrence(game_url, position, Motif::Promotion, None));
        if is_checkmate {
            out.push(occurrence(
                game_url,
                position,
                Motif::PromotionWithCheckmate,
                Some(true),
            ));
        } else if is_check {
            out.push(occurrence(
                game_url,
                position,
                Motif::PromotionWithCheck,
                Some(false),
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(san: &str) -> Position {
        Position {
            move_number: 40,
            white_to_move: false,
            fen: String::new(),
            ply: 79,
            san: Some(san.to_string()),
        }
    }

    #[test]
    fn promotion_with_checkmate_yields_three_flags_not_duplicated() {
        let occs = detect_derived_motifs("g1", &pos("e8=Q#"));
        let motifs: Vec<_> = occs.iter().map(|o| o.motif).collect();
        assert_eq!(motifs.len(), 3);
        assert!(motifs.contains(&Motif::Promotion));
        assert!(motifs.contains(&Motif::Checkmate));
        assert!(motifs.contains(&Motif::PromotionWithCheckmate));
        assert!(!motifs.contains(&Motif::Check));
    }

    #[test]
    fn plain_check_without_promotion() {
        let occs = detect_derived_motifs("g1", &pos("Qh5+"));
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].motif, Motif::Check);
    }

    #[test]
    fn quiet_move_yields_nothing() {
        assert!(detect_derived_motifs("g1", &pos("Nf3")).is_empty());
    }
}
