//! Pseudo-legal move generation: every move that obeys piece movement rules,
//! without checking whether it leaves the mover's own king in check. Legality
//! filtering happens one layer up, in `super::legal`.

use crate::board::attack_tables;
use crate::board::types::{Bitboard, Color, Move, MoveList, Piece, Square};
use crate::board::Position;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    All,
    CapturesOnly,
    QuietsOnly,
}

pub fn generate_pseudo_legal(pos: &Position, mode: GenMode, out: &mut MoveList) {
    let side = pos.side_to_move();
    generate_pawn_moves(pos, side, mode, out);
    generate_knight_moves(pos, side, mode, out);
    generate_bishop_moves(pos, side, mode, out);
    generate_rook_moves(pos, side, mode, out);
    generate_queen_moves(pos, side, mode, out);
    generate_king_moves(pos, side, mode, out);
    if mode != GenMode::CapturesOnly {
        generate_castles(pos, side, out);
    }
}

fn own_and_enemy(pos: &Position, side: Color) -> (Bitboard, Bitboard, Bitboard) {
    let own = pos.occupancy_of(side);
    let enemy = pos.occupancy_of(side.opponent());
    (own, enemy, own | enemy)
}

fn generate_pawn_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, occ) = own_and_enemy(pos, side);
    let pawns = pos.pieces_of(side, Piece::Pawn);
    let _ = own;

    let (push_dir, start_rank, promo_rank): (i32, usize, usize) = match side {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    for from in pawns.iter() {
        let rank = from.rank() as i32;
        let file = from.file();
        let one_rank = rank + push_dir;

        if mode != GenMode::CapturesOnly && (0..8).contains(&one_rank) {
            let one_sq = Square::new(one_rank as usize, file);
            if !occ.contains(one_sq) {
                push_pawn_move(out, from, one_sq, promo_rank);
                if from.rank() == start_rank {
                    let two_rank = rank + 2 * push_dir;
                    let two_sq = Square::new(two_rank as usize, file);
                    if !occ.contains(two_sq) {
                        out.push(Move::double_pawn_push(from, two_sq));
                    }
                }
            }
        }

        if mode != GenMode::QuietsOnly {
            for df in [-1i32, 1] {
                let cap_file = file as i32 + df;
                if !(0..8).contains(&cap_file) || !(0..8).contains(&one_rank) {
                    continue;
                }
                let to = Square::new(one_rank as usize, cap_file as usize);
                if enemy.contains(to) {
                    push_pawn_capture(out, from, to, promo_rank);
                } else if pos.en_passant_square().is_valid() && pos.en_passant_square() == to {
                    out.push(Move::en_passant(from, to));
                }
            }
        }
    }
}

fn push_pawn_move(out: &mut MoveList, from: Square, to: Square, promo_rank: usize) {
    if to.rank() == promo_rank {
        for &piece in &Piece::PROMOTIONS {
            out.push(Move::promotion(from, to, piece));
        }
    } else {
        out.push(Move::quiet(from, to));
    }
}

fn push_pawn_capture(out: &mut MoveList, from: Square, to: Square, promo_rank: usize) {
    if to.rank() == promo_rank {
        for &piece in &Piece::PROMOTIONS {
            out.push(Move::promo_capture(from, to, piece));
        }
    } else {
        out.push(Move::capture(from, to));
    }
}

fn generate_knight_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, _) = own_and_enemy(pos, side);
    for from in pos.pieces_of(side, Piece::Knight).iter() {
        emit_targets(out, from, attack_tables::knight_attacks(from), own, enemy, mode);
    }
}

fn generate_king_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, _) = own_and_enemy(pos, side);
    for from in pos.pieces_of(side, Piece::King).iter() {
        emit_targets(out, from, attack_tables::king_attacks(from), own, enemy, mode);
    }
}

fn generate_bishop_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, occ) = own_and_enemy(pos, side);
    for from in pos.pieces_of(side, Piece::Bishop).iter() {
        emit_targets(out, from, attack_tables::bishop_attacks(from, occ), own, enemy, mode);
    }
}

fn generate_rook_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, occ) = own_and_enemy(pos, side);
    for from in pos.pieces_of(side, Piece::Rook).iter() {
        emit_targets(out, from, attack_tables::rook_attacks(from, occ), own, enemy, mode);
    }
}

fn generate_queen_moves(pos: &Position, side: Color, mode: GenMode, out: &mut MoveList) {
    let (own, enemy, occ) = own_and_enemy(pos, side);
    for from in pos.pieces_of(side, Piece::Queen).iter() {
        emit_targets(out, from, attack_tables::queen_attacks(from, occ), own, enemy, mode);
    }
}

fn emit_targets(
    out: &mut MoveList,
    from: Square,
    targets: Bitboard,
    own: Bitboard,
    enemy: Bitboard,
    mode: GenMode,
) {
    let targets = targets.and(own.not());
    for to in targets.iter() {
        if enemy.contains(to) {
            if mode != GenMode::QuietsOnly {
                out.push(Move::capture(from, to));
            }
        } else if mode != GenMode::CapturesOnly {
            out.push(Move::quiet(from, to));
        }
    }
}

fn generate_castles(pos: &Position, side: Color, out: &mut MoveList) {
    use super::attacks::is_square_attacked;
    use crate::board::types::{BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE};

    if is_square_attacked(pos, pos.king_square(side), side.opponent()) {
        return;
    }

    let rights = pos.castling_rights();
    let occ = pos.all_occupancy();
    let rank = match side {
        Color::White => 0,
        Color::Black => 7,
    };
    let (king_bit, queen_bit) = match side {
        Color::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE),
        Color::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE),
    };
    let king_from = Square::new(rank, 4);

    if rights.has(king_bit) {
        let f = Square::new(rank, 5);
        let g = Square::new(rank, 6);
        if !occ.contains(f)
            && !occ.contains(g)
            && !is_square_attacked(pos, f, side.opponent())
            && !is_square_attacked(pos, g, side.opponent())
        {
            out.push(Move::king_castle(king_from, g));
        }
    }

    if rights.has(queen_bit) {
        let d = Square::new(rank, 3);
        let c = Square::new(rank, 2);
        let b = Square::new(rank, 1);
        if !occ.contains(d)
            && !occ.contains(c)
            && !occ.contains(b)
            && !is_square_attacked(pos, d, side.opponent())
            && !is_square_attacked(pos, c, side.opponent())
        {
            out.push(Move::queen_castle(king_from, c));
        }
    }
}
