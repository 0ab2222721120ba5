//! Game-phase computation used to interpolate between middlegame and
//! endgame piece-square tables and to gate phase-dependent eval terms.

use crate::board::{Color, Piece, Position};

/// Phase value at the start of the game: 2 knights + 2 bishops (weight 1
/// each) + 2 rooks (weight 2 each) + 1 queen (weight 4), per side, doubled.
pub const MAX_PHASE: i32 = 24;

/// Sum of `phase_weight()` over every piece currently on the board, clamped
/// to `MAX_PHASE` so heavy promotion underpromotion spam can't overflow it.
#[must_use]
pub fn game_phase(pos: &Position) -> i32 {
    let mut phase = 0;
    for color in Color::BOTH {
        for piece in Piece::ALL {
            phase += pos.pieces_of(color, piece).popcount() as i32 * piece.phase_weight();
        }
    }
    phase.min(MAX_PHASE)
}

/// Blend a middlegame and endgame score by the current phase, where
/// `phase == MAX_PHASE` is the full middlegame and `phase == 0` is a bare
/// endgame.
#[must_use]
pub fn taper(mg: i32, eg: i32, phase: i32) -> i32 {
    (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
}
