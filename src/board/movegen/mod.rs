//! Move generation: pseudo-legal generation per piece type, legality
//! filtering, and the attacked-square queries both layers share.

mod attacks;
mod legal;
mod pseudo;

pub use attacks::{attackers_to, is_in_check, is_square_attacked};
pub use legal::is_legal_move;
pub use pseudo::GenMode;

use crate::board::types::MoveList;
use crate::board::Position;

#[must_use]
pub fn generate_all_moves(pos: &mut Position) -> MoveList {
    let mut out = MoveList::new();
    legal::generate_legal(pos, GenMode::All, &mut out);
    out
}

#[must_use]
pub fn generate_captures(pos: &mut Position) -> MoveList {
    let mut out = MoveList::new();
    legal::generate_legal(pos, GenMode::CapturesOnly, &mut out);
    out
}

#[must_use]
pub fn generate_quiets(pos: &mut Position) -> MoveList {
    let mut out = MoveList::new();
    legal::generate_legal(pos, GenMode::QuietsOnly, &mut out);
    out
}

#[must_use]
pub fn is_checkmate(pos: &mut Position) -> bool {
    is_in_check(pos, pos.side_to_move()) && generate_all_moves(pos).is_empty()
}

#[must_use]
pub fn is_stalemate(pos: &mut Position) -> bool {
    !is_in_check(pos, pos.side_to_move()) && generate_all_moves(pos).is_empty()
}

#[must_use]
pub fn has_legal_moves(pos: &mut Position) -> bool {
    !generate_all_moves(pos).is_empty()
}
