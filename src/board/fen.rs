//! FEN parsing and serialization.

use crate::board::error::FenError;
use crate::board::state::Position;
use crate::board::types::{CastlingRights, Color, Piece, Square, NO_SQUARE};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a full six-field FEN string into a `Position`.
///
/// # Errors
/// Returns a `FenError` describing the first malformed field encountered.
/// Validates that each side has exactly one king, since the rest of the
/// engine assumes `king_square` always finds exactly one bit set.
pub fn from_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::TooFewFields { found: fields.len() });
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, fields[0])?;

    pos.set_side_to_move(match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidSideToMove { found: other.to_string() }),
    });

    let mut rights = CastlingRights::none();
    if fields[2] != "-" {
        for ch in fields[2].chars() {
            let bit = match ch {
                'K' => crate::board::types::WHITE_KINGSIDE,
                'Q' => crate::board::types::WHITE_QUEENSIDE,
                'k' => crate::board::types::BLACK_KINGSIDE,
                'q' => crate::board::types::BLACK_QUEENSIDE,
                _ => return Err(FenError::InvalidCastling { ch }),
            };
            rights = CastlingRights::from_mask(rights.mask() | bit);
        }
    }
    pos.set_castling_rights(rights);

    let ep = if fields[3] == "-" {
        NO_SQUARE
    } else {
        fields[3]
            .parse::<Square>()
            .map_err(|_| FenError::InvalidEnPassant { found: fields[3].to_string() })?
    };
    pos.set_en_passant(ep);

    let halfmove = if fields.len() > 4 {
        fields[4]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidHalfmoveClock { found: fields[4].to_string() })?
    } else {
        0
    };
    pos.set_halfmove_clock(halfmove);

    let fullmove = if fields.len() > 5 {
        fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber { found: fields[5].to_string() })?
    } else {
        1
    };
    pos.set_fullmove_number(fullmove);

    for color in Color::BOTH {
        let kings = pos.pieces_of(color, Piece::King).popcount();
        if kings == 0 {
            return Err(FenError::MissingKing { color });
        }
        if kings > 1 {
            return Err(FenError::TooManyKings { color });
        }
    }

    pos.clear_repetition_history();
    pos.push_repetition();
    Ok(pos)
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }

    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as usize;
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank });
                }
                continue;
            }
            if file >= 8 {
                return Err(FenError::TooManyFiles { rank });
            }
            let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece { ch })?;
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            pos.place(color, piece, Square::new(rank, file));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidRank { rank });
        }
    }
    Ok(())
}

/// Serialize a `Position` back into a six-field FEN string.
#[must_use]
pub fn to_fen(pos: &Position) -> String {
    let mut placement = String::new();
    for rank_from_top in 0..8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0;
        for file in 0..8 {
            match pos.piece_at(Square::new(rank, file)) {
                Some((color, piece)) => {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_fen_char(color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            placement.push('/');
        }
    }

    let side = if pos.side_to_move() == Color::White { "w" } else { "b" };

    let rights = pos.castling_rights();
    let mut castling = String::new();
    if rights.has(crate::board::types::WHITE_KINGSIDE) {
        castling.push('K');
    }
    if rights.has(crate::board::types::WHITE_QUEENSIDE) {
        castling.push('Q');
    }
    if rights.has(crate::board::types::BLACK_KINGSIDE) {
        castling.push('k');
    }
    if rights.has(crate::board::types::BLACK_QUEENSIDE) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let ep = if pos.en_passant_square().is_valid() {
        pos.en_passant_square().to_string()
    } else {
        "-".to_string()
    };

    format!(
        "{placement} {side} {castling} {ep} {} {}",
        pos.halfmove_clock(),
        pos.fullmove_number()
    )
}
