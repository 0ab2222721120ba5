//! Zobrist key tables: deterministic, process-global, immutable after init.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Color, Piece, Square};

/// Fixed seed so hashes are reproducible across runs on the same inputs.
const ZOBRIST_SEED: u64 = 0x5EED_C0DE_FEED_FACE;

pub(crate) struct ZobristKeys {
    /// `psq[color][piece][square]`
    psq: [[[u64; 64]; 6]; 2],
    /// One key per en-passant file (0-7); only the file matters.
    ep_file: [u64; 8],
    /// `castling[mask]` for all 16 masks, built so that
    /// `castling[a] ^ castling[b] == castling[a ^ b]` holds by construction.
    castling: [u64; 16],
    side_to_move: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut psq = [[[0u64; 64]; 6]; 2];
        for color in &mut psq {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut ep_file = [0u64; 8];
        for key in &mut ep_file {
            *key = rng.gen();
        }

        // Draw one key per individual castling right, then XOR-combine them
        // for every mask so the XOR-composability invariant holds exactly.
        let per_right: [u64; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
        let mut castling = [0u64; 16];
        for (mask, key) in castling.iter_mut().enumerate() {
            let mut k = 0u64;
            for (bit, right_key) in per_right.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    k ^= right_key;
                }
            }
            *key = k;
        }

        let side_to_move = rng.gen();

        ZobristKeys { psq, ep_file, castling, side_to_move }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.psq[color.index()][piece.index()][sq.as_index()]
    }

    #[inline]
    pub(crate) fn en_passant_file(&self, file: usize) -> u64 {
        self.ep_file[file]
    }

    #[inline]
    pub(crate) fn castling(&self, mask: u8) -> u64 {
        self.castling[mask as usize & 0xF]
    }

    #[inline]
    pub(crate) fn side_to_move(&self) -> u64 {
        self.side_to_move
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
