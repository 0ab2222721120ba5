//! King safety: pawn shield integrity and nearby enemy attackers. Only
//! meaningful while there's enough material left on the board for an attack
//! to matter, so this term is gated on the game phase.

use crate::board::movegen::attackers_to;
use crate::board::{Color, Piece, Position, Square};
use crate::eval::phase::MAX_PHASE;
use crate::eval::score::EvalScore;

const SHIELD_PAWN_BONUS: i32 = 10;
const ATTACKER_PENALTY: i32 = 15;

#[must_use]
pub fn king_safety(pos: &Position, phase: i32) -> EvalScore {
    if phase < MAX_PHASE / 2 {
        return EvalScore::ZERO;
    }

    let mut mg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        let king_sq = pos.king_square(color);
        mg += sign * shield_score(pos, color, king_sq);
        mg -= sign * attacker_score(pos, color, king_sq);
    }
    EvalScore::new(mg, 0)
}

/// +10 per own pawn standing on one of the 8 squares adjacent to the king.
fn shield_score(pos: &Position, color: Color, king_sq: Square) -> i32 {
    let own_pawns = pos.pieces_of(color, Piece::Pawn);
    let mut count = 0;
    for file in king_sq.file().saturating_sub(1)..=(king_sq.file() + 1).min(7) {
        for rank in king_sq.rank().saturating_sub(1)..=(king_sq.rank() + 1).min(7) {
            let sq = Square::new(rank, file);
            if sq != king_sq && own_pawns.contains(sq) {
                count += 1;
            }
        }
    }
    count * SHIELD_PAWN_BONUS
}

/// -15 per enemy piece currently attacking the king's own square.
fn attacker_score(pos: &Position, color: Color, king_sq: Square) -> i32 {
    let attackers = attackers_to(pos, king_sq, color.opponent()).popcount() as i32;
    attackers * ATTACKER_PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::from_fen;
    use crate::eval::phase::game_phase;

    #[test]
    fn intact_shield_beats_an_exposed_king() {
        let sheltered = from_fen("r3k2r/8/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let exposed = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let phase = game_phase(&sheltered);
        assert!(king_safety(&sheltered, phase).mg > king_safety(&exposed, phase).mg);
    }

    #[test]
    fn term_is_gated_off_in_deep_endgames() {
        let pos = from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(king_safety(&pos, 0), EvalScore::ZERO);
    }
}
