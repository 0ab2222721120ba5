//! Board representation: types, error handling, Zobrist hashing, attack
//! tables, position state, move generation, and FEN I/O.

pub mod attack_tables;
pub mod error;
pub mod fen;
pub mod make_unmake;
pub mod movegen;
pub mod see;
pub mod state;
pub mod types;
mod zobrist;

pub use error::{FenError, MoveParseError, SquareError};
pub use make_unmake::NullMoveInfo;
pub use state::{Position, UnmakeInfo};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    ScoredMove, Square, NO_SQUARE,
};

pub(crate) use zobrist::ZOBRIST;
