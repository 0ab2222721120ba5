//! Square-attacked and checking-piece queries, shared by move generation,
//! castling legality, and the evaluator's king-safety term.

use crate::board::attack_tables;
use crate::board::types::{Bitboard, Color, Piece, Square};
use crate::board::Position;

/// True if any piece of `by_color` attacks `sq` in the current occupancy.
#[must_use]
pub fn is_square_attacked(pos: &Position, sq: Square, by_color: Color) -> bool {
    !attackers_to(pos, sq, by_color).is_empty()
}

/// Every square occupied by a `by_color` piece that attacks `sq`.
#[must_use]
pub fn attackers_to(pos: &Position, sq: Square, by_color: Color) -> Bitboard {
    let occ = pos.all_occupancy();

    let pawns = pos.pieces_of(by_color, Piece::Pawn);
    let pawn_attackers = attack_tables::pawn_attacks(by_color.opponent(), sq) & pawns;

    let knights = pos.pieces_of(by_color, Piece::Knight);
    let knight_attackers = attack_tables::knight_attacks(sq) & knights;

    let kings = pos.pieces_of(by_color, Piece::King);
    let king_attackers = attack_tables::king_attacks(sq) & kings;

    let bishops_queens = pos.pieces_of(by_color, Piece::Bishop) | pos.pieces_of(by_color, Piece::Queen);
    let bishop_attackers = attack_tables::bishop_attacks(sq, occ) & bishops_queens;

    let rooks_queens = pos.pieces_of(by_color, Piece::Rook) | pos.pieces_of(by_color, Piece::Queen);
    let rook_attackers = attack_tables::rook_attacks(sq, occ) & rooks_queens;

    pawn_attackers | knight_attackers | king_attackers | bishop_attackers | rook_attackers
}

#[must_use]
pub fn is_in_check(pos: &Position, color: Color) -> bool {
    is_square_attacked(pos, pos.king_square(color), color.opponent())
}
