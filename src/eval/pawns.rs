//! Pawn-structure terms: isolated, doubled, and passed pawns.

use crate::board::{Bitboard, Color, Piece, Position, Square};
use crate::eval::score::EvalScore;

/// Per-pawn penalty for having no friendly pawn on either adjacent file.
const ISOLATED_PENALTY: i32 = -20;
/// Per-pawn penalty for sharing a file with another friendly pawn.
const DOUBLED_PENALTY: i32 = -10;
/// Passed-pawn bonus: `20 + 10 * advanced_rank`, where `advanced_rank` is the
/// pawn's rank counted from its own back rank (0-indexed).
const PASSED_BASE_BONUS: i32 = 20;
const PASSED_ADVANCE_BONUS: i32 = 10;

#[must_use]
pub fn pawn_structure(pos: &Position) -> EvalScore {
    let mut mg = 0;
    for color in Color::BOTH {
        let sign = if color == Color::White { 1 } else { -1 };
        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let enemy_pawns = pos.pieces_of(color.opponent(), Piece::Pawn);

        for file in 0..8 {
            let file_mask = Bitboard::file_mask(file);
            let count = own_pawns.and(file_mask).popcount();
            if count == 0 {
                continue;
            }
            if count > 1 {
                mg += sign * DOUBLED_PENALTY * count as i32;
            }
            if !has_neighbor_file_pawn(own_pawns, file) {
                mg += sign * ISOLATED_PENALTY * count as i32;
            }
        }

        for sq in own_pawns.iter() {
            if is_passed(sq, color, enemy_pawns) {
                let rank_from_own_side = match color {
                    Color::White => sq.rank(),
                    Color::Black => 7 - sq.rank(),
                };
                let advanced_rank = rank_from_own_side as i32;
                mg += sign * (PASSED_BASE_BONUS + PASSED_ADVANCE_BONUS * advanced_rank);
            }
        }
    }
    EvalScore::flat(mg)
}

fn has_neighbor_file_pawn(own_pawns: Bitboard, file: usize) -> bool {
    let mut neighbors = Bitboard::EMPTY;
    if file > 0 {
        neighbors |= Bitboard::file_mask(file - 1);
    }
    if file < 7 {
        neighbors |= Bitboard::file_mask(file + 1);
    }
    own_pawns.intersects(neighbors)
}

/// A pawn is passed if no enemy pawn can ever block or capture it on its way
/// to promotion: none on its file or an adjacent file, at or ahead of it.
fn is_passed(sq: Square, color: Color, enemy_pawns: Bitboard) -> bool {
    let file = sq.file();
    let mut front_span = Bitboard::EMPTY;
    if file > 0 {
        front_span |= Bitboard::file_mask(file - 1);
    }
    front_span |= Bitboard::file_mask(file);
    if file < 7 {
        front_span |= Bitboard::file_mask(file + 1);
    }

    let ahead_mask = match color {
        Color::White => ranks_above(sq.rank()),
        Color::Black => ranks_below(sq.rank()),
    };

    enemy_pawns.and(front_span).and(ahead_mask).is_empty()
}

fn ranks_above(rank: usize) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for r in (rank + 1)..8 {
        bb |= Bitboard::rank_mask(r);
    }
    bb
}

fn ranks_below(rank: usize) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for r in 0..rank {
        bb |= Bitboard::rank_mask(r);
    }
    bb
}
