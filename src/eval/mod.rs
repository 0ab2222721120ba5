//! Static position evaluation: material, placement, pawn structure, king
//! safety, mobility, threats, opening principles, endgame king activity, and
//! rook-file placement, tapered across the game phase and returned from the
//! side-to-move's perspective for direct use in negamax search.

mod endgame;
mod king_safety;
mod material;
mod mobility;
mod opening;
mod pawns;
mod phase;
mod pst;
mod rook_file;
mod score;
mod threats;

pub use phase::{game_phase, MAX_PHASE};
pub use score::EvalScore;

use crate::board::{Color, Position};

/// Evaluate `pos` in centipawns from the side-to-move's perspective: positive
/// means the side to move is better, matching the sign convention negamax
/// search expects. Swapping `pos`'s side to move and mirroring the board
/// exactly negates this value (see `tests::evaluator_is_symmetric`).
#[must_use]
pub fn evaluate(pos: &Position) -> i32 {
    let phase = phase::game_phase(pos);

    let mut total = EvalScore::ZERO;
    total += material::material_and_placement(pos);
    total += pawns::pawn_structure(pos);
    total += king_safety::king_safety(pos, phase);
    total += mobility::mobility(pos);
    total += threats::threats(pos);
    total += opening::opening_principles(pos);
    total += endgame::endgame_king_activity(pos);
    total += rook_file::rook_files(pos);

    let white_relative = phase::taper(total.mg, total.eg, phase);

    match pos.side_to_move() {
        Color::White => white_relative,
        Color::Black => -white_relative,
    }
}
