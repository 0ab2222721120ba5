//! Mobility: bonus per square a knight, bishop, rook, or queen can reach,
//! excluding squares occupied by friendly pieces.

use crate::board::attack_tables;
use crate::board::{Color, Piece, Position};
use crate::eval::score::EvalScore;

/// Flat centipawns per pseudo-legal, non-own-blocked target square.
const MOBILITY_WEIGHT: i32 = 2;

#[must_use]
pub fn mobility(pos: &Position) -> EvalScore {
    let mut mg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        let own = pos.occupancy_of(color);
        let occ = pos.all_occupancy();

        for sq in pos.pieces_of(color, Piece::Knight).iter() {
            mg += sign * MOBILITY_WEIGHT * attack_tables::knight_attacks(sq).and(own.not()).popcount() as i32;
        }
        for sq in pos.pieces_of(color, Piece::Bishop).iter() {
            mg += sign
                * MOBILITY_WEIGHT
                * attack_tables::bishop_attacks(sq, occ).and(own.not()).popcount() as i32;
        }
        for sq in pos.pieces_of(color, Piece::Rook).iter() {
            mg += sign * MOBILITY_WEIGHT * attack_tables::rook_attacks(sq, occ).and(own.not()).popcount() as i32;
        }
        for sq in pos.pieces_of(color, Piece::Queen).iter() {
            mg += sign
                * MOBILITY_WEIGHT
                * attack_tables::queen_attacks(sq, occ).and(own.not()).popcount() as i32;
        }
    }
    EvalScore::flat(mg)
}
