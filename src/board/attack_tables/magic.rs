//! Magic-bitboard sliding attacks for bishops and rooks.
//!
//! Magic numbers are not hardcoded: each is found at process startup by a
//! seeded random search over sparse 64-bit candidates, validated to produce a
//! collision-free hash over every occupancy subset of the square's relevant
//! blocker mask. The search is deterministic given the fixed seed, so the
//! resulting attack tables are identical across runs.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Square;
use crate::board::types::Bitboard;

const MAGIC_SEED: u64 = 0xBEEF_CAFE_D00D_0042;

const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Blocker mask for a rook on `sq`: all squares a rook could be blocked by,
/// excluding the board edge in each direction (the edge square itself is
/// always "occupied" as far as the slider is concerned, so it never needs to
/// appear in the mask).
fn rook_relevant_mask(sq: Square) -> Bitboard {
    ray_mask(sq, &ROOK_DIRS, true)
}

fn bishop_relevant_mask(sq: Square) -> Bitboard {
    ray_mask(sq, &BISHOP_DIRS, true)
}

/// Full sliding attack set given a direction list and a real blocker set.
/// When `stop_before_edge` is true, rays exclude the final edge square (used
/// to build the relevant-occupancy mask); otherwise they include it (used to
/// compute actual attacks, since a slider does attack the edge).
fn ray_mask(sq: Square, dirs: &[(i32, i32); 4], stop_before_edge: bool) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    let rank = sq.rank() as i32;
    let file = sq.file() as i32;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let next_r = r + dr;
            let next_f = f + df;
            let on_edge = !(0..8).contains(&next_r) || !(0..8).contains(&next_f);
            if stop_before_edge && on_edge {
                break;
            }
            bb |= Bitboard::from_square(Square::new(r as usize, f as usize));
            r = next_r;
            f = next_f;
        }
    }
    bb
}

/// Sliding attacks from `sq` given the real board occupancy, stopping at (and
/// including) the first blocker in each direction.
fn sliding_attacks(sq: Square, occupancy: Bitboard, dirs: &[(i32, i32); 4]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    let rank = sq.rank() as i32;
    let file = sq.file() as i32;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::new(r as usize, f as usize);
            bb |= Bitboard::from_square(target);
            if occupancy.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    bb
}

/// Enumerate every subset of `mask` via the carry-rippler trick.
fn subsets_of(mask: Bitboard) -> Vec<Bitboard> {
    let mut subsets = Vec::with_capacity(1 << mask.popcount());
    let mut subset = 0u64;
    loop {
        subsets.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }
    subsets
}

struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    table: Vec<Bitboard>,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupancy: Bitboard) -> usize {
        let relevant = occupancy.and(self.mask);
        ((relevant.0.wrapping_mul(self.magic)) >> self.shift) as usize
    }

    #[inline]
    fn attacks(&self, occupancy: Bitboard) -> Bitboard {
        self.table[self.index(occupancy)]
    }
}

/// Search for a magic number that hashes every subset of `mask` to a distinct
/// slot (collisions are only tolerated when both subsets produce the same
/// attack set, since then either slot is correct).
fn find_magic(
    sq: Square,
    mask: Bitboard,
    dirs: &[(i32, i32); 4],
    rng: &mut StdRng,
) -> (u64, Vec<Bitboard>) {
    let bits = mask.popcount();
    let shift = 64 - bits;
    let subsets = subsets_of(mask);
    let reference: Vec<Bitboard> = subsets
        .iter()
        .map(|&occ| sliding_attacks(sq, occ, dirs))
        .collect();

    loop {
        // AND-ing three random u64s sparsifies the candidate, which tends to
        // produce far fewer collisions than a single uniform random draw.
        let magic: u64 = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }

        let mut table = vec![None; 1usize << bits];
        let mut ok = true;
        for (occ, &attacks) in subsets.iter().zip(reference.iter()) {
            let idx = ((occ.0.wrapping_mul(magic)) >> shift) as usize;
            match table[idx] {
                None => table[idx] = Some(attacks),
                Some(existing) if existing == attacks => {}
                Some(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            continue;
        }
        let table = table.into_iter().map(|a| a.unwrap_or(Bitboard::EMPTY)).collect();
        return (magic, table);
    }
}

struct MagicTables {
    rook: Vec<MagicEntry>,
    bishop: Vec<MagicEntry>,
}

static MAGICS: Lazy<MagicTables> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let mut rook = Vec::with_capacity(64);
    let mut bishop = Vec::with_capacity(64);

    for idx in 0..64 {
        let sq = Square::from_index(idx);

        let mask = rook_relevant_mask(sq);
        let (magic, table) = find_magic(sq, mask, &ROOK_DIRS, &mut rng);
        rook.push(MagicEntry { mask, magic, shift: 64 - mask.popcount(), table });

        let mask = bishop_relevant_mask(sq);
        let (magic, table) = find_magic(sq, mask, &BISHOP_DIRS, &mut rng);
        bishop.push(MagicEntry { mask, magic, shift: 64 - mask.popcount(), table });
    }

    MagicTables { rook, bishop }
});

#[must_use]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    MAGICS.rook[sq.as_index()].attacks(occupancy)
}

#[must_use]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    MAGICS.bishop[sq.as_index()].attacks(occupancy)
}

#[must_use]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy) | bishop_attacks(sq, occupancy)
}
