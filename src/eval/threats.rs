//! Threats: bonus for pawn attacks landing on an undefended-by-type enemy
//! non-pawn piece, scaled by the value of the piece under attack.

use crate::board::attack_tables;
use crate::board::{Color, Piece, Position};
use crate::eval::score::EvalScore;

/// Flat bonus per enemy non-pawn piece currently attacked by one of our pawns.
const PAWN_THREAT_BONUS: i32 = 25;

#[must_use]
pub fn threats(pos: &Position) -> EvalScore {
    let mut mg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        let enemy_non_pawns = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .into_iter()
            .fold(crate::board::Bitboard::EMPTY, |acc, p| acc | pos.pieces_of(color.opponent(), p));
        for from in pos.pieces_of(color, Piece::Pawn).iter() {
            let hit = attack_tables::pawn_attacks(color, from).and(enemy_non_pawns).popcount() as i32;
            mg += sign * hit * PAWN_THREAT_BONUS;
        }
    }
    EvalScore::flat(mg)
}
