//! Rook placement on open and semi-open files.

use crate::board::{Bitboard, Color, Piece, Position};
use crate::eval::score::EvalScore;

/// Per rook on a file with no pawn of either color.
const OPEN_FILE_BONUS: i32 = 25;
/// Per rook on a file with no own pawn but at least one enemy pawn.
const SEMI_OPEN_FILE_BONUS: i32 = 15;

#[must_use]
pub fn rook_files(pos: &Position) -> EvalScore {
    let mut mg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let enemy_pawns = pos.pieces_of(color.opponent(), Piece::Pawn);

        for rook in pos.pieces_of(color, Piece::Rook).iter() {
            let file_mask = Bitboard::file_mask(rook.file());
            let own_on_file = own_pawns.intersects(file_mask);
            let enemy_on_file = enemy_pawns.intersects(file_mask);
            if !own_on_file && !enemy_on_file {
                mg += sign * OPEN_FILE_BONUS;
            } else if !own_on_file {
                mg += sign * SEMI_OPEN_FILE_BONUS;
            }
        }
    }
    EvalScore::flat(mg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::from_fen;

    #[test]
    fn rook_on_fully_open_file_outscores_a_blocked_one() {
        let open = from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let blocked = from_fen("4k3/p7/8/8/8/8/P7/R3K3 w - - 0 1").unwrap();
        assert!(rook_files(&open).mg > rook_files(&blocked).mg);
    }

    #[test]
    fn semi_open_file_scores_between_open_and_blocked() {
        let semi_open = from_fen("4k3/p7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let blocked = from_fen("4k3/p7/8/8/8/8/P7/R3K3 w - - 0 1").unwrap();
        assert!(rook_files(&semi_open).mg > rook_files(&blocked).mg);
    }
}
