//! Endgame-only king activity: once few enough pieces remain, the king
//! should centralize rather than hide, so reward proximity to the center.

use crate::board::{Color, Position, Square};
use crate::eval::score::EvalScore;

const MAX_PIECES_FOR_ENDGAME_TERM: u32 = 10;
const CENTRALIZATION_WEIGHT: i32 = 5;

#[must_use]
pub fn endgame_king_activity(pos: &Position) -> EvalScore {
    if pos.total_piece_count() > MAX_PIECES_FOR_ENDGAME_TERM {
        return EvalScore::ZERO;
    }

    let mut eg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        eg += sign * centralization_bonus(pos.king_square(color));
    }
    EvalScore::new(0, eg)
}

/// `5 * (14 - king_center_distance)`, where `king_center_distance = |file-3| +
/// |file-4| + |rank-3| + |rank-4|` rewards standing on one of the four
/// central squares (distance 2) over a corner (distance 12).
fn centralization_bonus(sq: Square) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    let king_center_distance = (file - 3).abs() + (file - 4).abs() + (rank - 3).abs() + (rank - 4).abs();
    CENTRALIZATION_WEIGHT * (14 - king_center_distance)
}
