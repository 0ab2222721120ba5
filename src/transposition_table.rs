//! Transposition table: a fixed-size hash table of previously-searched
//! positions, keyed by the incremental Zobrist hash. Coarse-grained locking
//! via `parking_lot::RwLock` is enough here since only one search runs at a
//! time; this trades away the last bit of lock-free throughput for a table
//! that's trivially safe to resize or clear mid-session from another thread.

use parking_lot::RwLock;

use crate::board::Move;
use crate::search::{MATE_SCORE, MAX_PLY};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Exact,
    Alpha,
    Beta,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
    pub age: u8,
}

const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Mate scores are stored as "distance from this node" rather than
/// "distance from the search root", since the same sub-position can be
/// reached at different plies; this converts a root-relative score to the
/// node-relative form used in storage.
fn to_tt_score(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of `to_tt_score`: converts a stored node-relative mate score back
/// to the root-relative form the search expects.
fn from_tt_score(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

const DEFAULT_SIZE_MB: usize = 16;
const BYTES_PER_SLOT: usize = std::mem::size_of::<Option<TtEntry>>();

pub struct TranspositionTable {
    slots: RwLock<Vec<Option<TtEntry>>>,
    mask: RwLock<usize>,
    age: RwLock<u8>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let (slots, mask) = allocate(size_mb);
        TranspositionTable {
            slots: RwLock::new(slots),
            mask: RwLock::new(mask),
            age: RwLock::new(0),
        }
    }

    pub fn resize(&self, size_mb: usize) {
        let (slots, mask) = allocate(size_mb);
        *self.slots.write() = slots;
        *self.mask.write() = mask;
    }

    pub fn clear(&self) {
        let mut slots = self.slots.write();
        slots.iter_mut().for_each(|s| *s = None);
        *self.age.write() = 0;
    }

    pub fn new_search(&self) {
        let mut age = self.age.write();
        *age = age.wrapping_add(1);
    }

    #[must_use]
    pub fn probe(&self, hash: u64, ply: usize) -> Option<TtEntry> {
        let mask = *self.mask.read();
        let slots = self.slots.read();
        let entry = slots[(hash as usize) & mask]?;
        if entry.hash != hash {
            return None;
        }
        Some(TtEntry { score: from_tt_score(entry.score, ply), ..entry })
    }

    /// Replacement rule: always replace an empty or stale-age slot; replace
    /// a same-age slot only if the new entry searched at least as deep, so a
    /// shallow re-probe never evicts a deeper result from earlier this search.
    pub fn store(
        &self,
        hash: u64,
        depth: u8,
        score: i32,
        bound: Bound,
        best_move: Move,
        ply: usize,
    ) {
        let mask = *self.mask.read();
        let age = *self.age.read();
        let mut slots = self.slots.write();
        let idx = (hash as usize) & mask;
        let replace = match slots[idx] {
            None => true,
            Some(existing) => existing.age != age || existing.depth <= depth || existing.hash == hash,
        };
        if replace {
            slots[idx] = Some(TtEntry {
                hash,
                depth,
                score: to_tt_score(score, ply),
                bound,
                best_move,
                age,
            });
        }
    }

    /// Permille of slots occupied by the current search generation, the
    /// conventional "hashfull" UCI-info statistic.
    #[must_use]
    pub fn hashfull_permille(&self) -> u32 {
        let age = *self.age.read();
        let slots = self.slots.read();
        let sample = slots.len().min(1000);
        if sample == 0 {
            return 0;
        }
        let filled = slots[..sample].iter().filter(|s| matches!(s, Some(e) if e.age == age)).count();
        (filled * 1000 / sample) as u32
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.read().len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_SIZE_MB)
    }
}

/// Largest power of two that is `<= n` (n >= 1).
fn floor_power_of_two(n: usize) -> usize {
    if n.is_power_of_two() {
        n
    } else {
        n.next_power_of_two() / 2
    }
}

fn allocate(size_mb: usize) -> (Vec<Option<TtEntry>>, usize) {
    let bytes = size_mb.max(1) * 1024 * 1024;
    let slot_count = (bytes / BYTES_PER_SLOT).max(1024);
    let pow2 = floor_power_of_two(slot_count).max(1024);
    (vec![None; pow2], pow2 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn stored_entry_round_trips_through_probe() {
        let tt = TranspositionTable::new(1);
        let mv = Move::quiet(Square::new(1, 0), Square::new(2, 0));
        tt.store(0xDEAD_BEEF, 5, 123, Bound::Exact, mv, 0);
        let entry = tt.probe(0xDEAD_BEEF, 0).unwrap();
        assert_eq!(entry.score, 123);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.best_move, mv);
    }

    #[test]
    fn hash_collision_on_index_is_rejected() {
        let tt = TranspositionTable::new(1);
        let mv = Move::quiet(Square::new(1, 0), Square::new(2, 0));
        tt.store(1, 5, 100, Bound::Exact, mv, 0);
        assert!(tt.probe(2, 0).is_none() || tt.probe(2, 0).unwrap().hash == 2);
    }

    #[test]
    fn mate_score_is_ply_adjusted_through_storage() {
        let tt = TranspositionTable::new(1);
        let mv = Move::quiet(Square::new(1, 0), Square::new(2, 0));
        let mate_in_three_from_root = MATE_SCORE - 6;
        tt.store(42, 10, mate_in_three_from_root, Bound::Exact, mv, 4);
        let entry = tt.probe(42, 4).unwrap();
        assert_eq!(entry.score, mate_in_three_from_root);
    }

    #[test]
    fn allocated_capacity_never_exceeds_the_requested_size() {
        for size_mb in [1usize, 2, 3, 5, 16, 64] {
            let tt = TranspositionTable::new(size_mb);
            let bytes = tt.capacity() * BYTES_PER_SLOT;
            assert!(
                bytes <= size_mb * 1024 * 1024,
                "{size_mb} MiB request used {bytes} bytes ({} slots)",
                tt.capacity()
            );
        }
    }

    #[test]
    fn clear_empties_every_slot() {
        let tt = TranspositionTable::new(1);
        let mv = Move::quiet(Square::new(1, 0), Square::new(2, 0));
        tt.store(7, 1, 1, Bound::Exact, mv, 0);
        tt.clear();
        assert!(tt.probe(7, 0).is_none());
    }
}
