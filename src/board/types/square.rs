//! Square type and algebraic-notation conversions.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

pub(crate) fn file_to_index(file: char) -> usize {
    file as usize - 'a' as usize
}

pub(crate) fn rank_to_index(rank: char) -> usize {
    rank as usize - '1' as usize
}

/// A square on the chess board, stored as a compact 0-63 index.
///
/// Index layout: `rank * 8 + file`, so a1 = 0, b1 = 1, ..., h8 = 63 -- matching
/// `file = square & 7` and `rank = square >> 3`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

/// Sentinel for "no square", used for e.g. a cleared en-passant target.
pub const NO_SQUARE: Square = Square(64);

impl Square {
    /// Construct a square from rank and file, both 0-7. Not bounds-checked.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Construct a square from rank and file, checking bounds.
    #[must_use]
    pub const fn try_new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square::new(rank, file))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 >> 3) as usize
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 & 7) as usize
    }

    /// Vertical mirror (a1 <-> a8), used by PST lookup for Black and by
    /// evaluator-symmetry checks.
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    #[inline]
    #[must_use]
    pub const fn flip_horizontal(self) -> Self {
        Square::new(self.rank(), 7 - self.file())
    }

    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 < 64
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Square) -> i32 {
        let df = (self.file() as i32 - other.file() as i32).abs();
        let dr = (self.rank() as i32 - other.rank() as i32).abs();
        df + dr
    }

    #[must_use]
    pub fn chebyshev_distance(self, other: Square) -> i32 {
        let df = (self.file() as i32 - other.file() as i32).abs();
        let dr = (self.rank() as i32 - other.rank() as i32).abs();
        df.max(dr)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "-");
        }
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidNotation { notation: s.to_string() });
        }
        let file = match chars[0] {
            'a'..='h' => file_to_index(chars[0]),
            _ => return Err(SquareError::InvalidNotation { notation: s.to_string() }),
        };
        let rank = match chars[1] {
            '1'..='8' => rank_to_index(chars[1]),
            _ => return Err(SquareError::InvalidNotation { notation: s.to_string() }),
        };
        Ok(Square::new(rank, file))
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square::new(rank, file))
    }
}
