//! Non-sliding attack tables: pawns, knights, and kings.
//!
//! None of these depend on occupancy, so each is a flat 64- (or 2x64-) entry
//! table computed once and indexed directly.

use once_cell::sync::Lazy;

use crate::board::{Bitboard, Color, Square};

fn knight_attacks_from(sq: Square) -> Bitboard {
    let rank = sq.rank() as i32;
    let file = sq.file() as i32;
    const DELTAS: [(i32, i32); 8] = [
        (1, 2), (2, 1), (2, -1), (1, -2),
        (-1, -2), (-2, -1), (-2, 1), (-1, 2),
    ];
    let mut bb = Bitboard::EMPTY;
    for (dr, df) in DELTAS {
        let (r, f) = (rank + dr, file + df);
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb |= Bitboard::from_square(Square::new(r as usize, f as usize));
        }
    }
    bb
}

fn king_attacks_from(sq: Square) -> Bitboard {
    let rank = sq.rank() as i32;
    let file = sq.file() as i32;
    let mut bb = Bitboard::EMPTY;
    for dr in -1..=1 {
        for df in -1..=1 {
            if dr == 0 && df == 0 {
                continue;
            }
            let (r, f) = (rank + dr, file + df);
            if (0..8).contains(&r) && (0..8).contains(&f) {
                bb |= Bitboard::from_square(Square::new(r as usize, f as usize));
            }
        }
    }
    bb
}

fn pawn_attacks_from(color: Color, sq: Square) -> Bitboard {
    let rank = sq.rank() as i32;
    let file = sq.file() as i32;
    let dr = if color == Color::White { 1 } else { -1 };
    let mut bb = Bitboard::EMPTY;
    for df in [-1, 1] {
        let (r, f) = (rank + dr, file + df);
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb |= Bitboard::from_square(Square::new(r as usize, f as usize));
        }
    }
    bb
}

struct LeaperTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
}

static LEAPERS: Lazy<LeaperTables> = Lazy::new(|| {
    let mut knight = [Bitboard::EMPTY; 64];
    let mut king = [Bitboard::EMPTY; 64];
    let mut pawn = [[Bitboard::EMPTY; 64]; 2];
    for idx in 0..64 {
        let sq = Square::from_index(idx);
        knight[idx] = knight_attacks_from(sq);
        king[idx] = king_attacks_from(sq);
        pawn[Color::White.index()][idx] = pawn_attacks_from(Color::White, sq);
        pawn[Color::Black.index()][idx] = pawn_attacks_from(Color::Black, sq);
    }
    LeaperTables { knight, king, pawn }
});

#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    LEAPERS.knight[sq.as_index()]
}

#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    LEAPERS.king[sq.as_index()]
}

/// Squares attacked by a pawn of `color` standing on `sq`.
#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    LEAPERS.pawn[color.index()][sq.as_index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_in_center_has_eight_targets() {
        assert_eq!(knight_attacks(Square::new(3, 3)).popcount(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        assert_eq!(knight_attacks(Square::new(0, 0)).popcount(), 2);
    }

    #[test]
    fn king_in_center_has_eight_targets() {
        assert_eq!(king_attacks(Square::new(3, 3)).popcount(), 8);
    }

    #[test]
    fn king_in_corner_has_three_targets() {
        assert_eq!(king_attacks(Square::new(0, 0)).popcount(), 3);
    }

    #[test]
    fn white_pawn_attacks_forward_diagonals() {
        let attacks = pawn_attacks(Color::White, Square::new(3, 3));
        assert!(attacks.contains(Square::new(4, 2)));
        assert!(attacks.contains(Square::new(4, 4)));
        assert_eq!(attacks.popcount(), 2);
    }

    #[test]
    fn black_pawn_attacks_backward_diagonals() {
        let attacks = pawn_attacks(Color::Black, Square::new(3, 3));
        assert!(attacks.contains(Square::new(2, 2)));
        assert!(attacks.contains(Square::new(2, 4)));
    }
}
