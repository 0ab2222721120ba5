//! Material balance and piece-square placement, combined since both are
//! simple per-piece sums over the board.

use crate::board::{Color, Piece, Position};
use crate::eval::pst;
use crate::eval::score::EvalScore;

/// Awarded once to a side holding both bishops, since the pair covers both
/// color complexes in a way no single bishop or same-complex pair can.
const BISHOP_PAIR_BONUS: i32 = 50;

#[must_use]
pub fn material_and_placement(pos: &Position) -> EvalScore {
    let mut score = EvalScore::ZERO;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        for piece in Piece::ALL {
            for sq in pos.pieces_of(color, piece).iter() {
                score += EvalScore::flat(piece.value() * sign);
                let placement = pst::value(color, piece, sq);
                score += if color == Color::White { placement } else { -placement };
            }
        }
        if pos.pieces_of(color, Piece::Bishop).popcount() >= 2 {
            score += EvalScore::flat(BISHOP_PAIR_BONUS * sign);
        }
    }
    score
}
