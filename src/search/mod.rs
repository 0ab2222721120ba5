//! Iterative-deepening alpha-beta search built on top of the board and
//! evaluation layers: negamax with PVS, null-move and late-move reductions,
//! quiescence search, a transposition table, and killer/history move
//! ordering. The public surface is [`Engine`]; everything else here is
//! plumbing private to the search tree.

mod constants;
mod negamax;
mod order;
mod pv;
mod quiescence;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

pub use constants::{MATE_SCORE, MATE_THRESHOLD, MAX_PLY};

use crate::board::movegen::generate_all_moves;
use crate::board::{Move, Position};
use crate::transposition_table::TranspositionTable;

/// Running counters for the most recent (or in-progress) search, mirroring
/// what a UCI `info` line reports.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub nodes: u64,
    pub q_nodes: u64,
    pub tt_hits: u64,
    pub tt_misses: u64,
    pub beta_cutoffs: u64,
    pub first_move_cutoffs: u64,
    pub max_depth_reached: u32,
    pub elapsed_sec: f64,
}

impl Stats {
    #[must_use]
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.q_nodes
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> u64 {
        if self.elapsed_sec <= 0.0 {
            0
        } else {
            (self.total_nodes() as f64 / self.elapsed_sec) as u64
        }
    }

    /// Ratio of beta cutoffs to first-move cutoffs; close to 1.0 means move
    /// ordering is putting the refuting move first almost every time.
    #[must_use]
    pub fn first_move_cutoff_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64
        }
    }
}

/// Owns everything a search needs across iterations: the transposition
/// table, move-ordering tables, the PV table, and cooperative-cancellation
/// state. One `Engine` is meant to live for the lifetime of a game, reused
/// move after move so the TT and history tables keep their value.
pub struct Engine {
    tt: TranspositionTable,
    killers: order::KillerTable,
    history: order::HistoryTable,
    pv: pv::PrincipalVariation,
    stop: Arc<AtomicBool>,
    stats: Stats,
    start_time: Instant,
    time_limit_ms: u64,
    stopped: bool,
}

impl Engine {
    #[must_use]
    pub fn new(tt_size_mib: usize) -> Self {
        Engine {
            tt: TranspositionTable::new(tt_size_mib),
            killers: order::KillerTable::new(),
            history: order::HistoryTable::new(),
            pv: pv::PrincipalVariation::new(),
            stop: Arc::new(AtomicBool::new(false)),
            stats: Stats::default(),
            start_time: Instant::now(),
            time_limit_ms: 0,
            stopped: false,
        }
    }

    fn new_search(&mut self, time_limit_ms: u64) {
        self.tt.new_search();
        self.killers.clear();
        self.history.decay();
        self.pv = pv::PrincipalVariation::new();
        self.stats = Stats::default();
        self.start_time = Instant::now();
        self.time_limit_ms = time_limit_ms;
        self.stopped = false;
        self.stop.store(false, Ordering::Relaxed);
    }

    /// Iterative-deepening entry point: searches depth 1, 2, 3, ... up to
    /// `max_depth`, stopping early if `time_limit_ms` elapses (0 means no
    /// limit). Returns the best move found by the last fully-completed
    /// iteration; an iteration cut short by the clock never overwrites it.
    pub fn get_best_move(&mut self, pos: &mut Position, max_depth: u8, time_limit_ms: u64) -> Move {
        self.new_search(time_limit_ms);

        let mut best_move = Move::null();
        let depth_limit = max_depth.max(1);

        for depth in 1..=depth_limit {
            self.pv.clear_at(0);
            self.negamax(pos, i32::from(depth), -MATE_SCORE, MATE_SCORE, 0, true);

            if self.stopped {
                break;
            }
            if let Some(mv) = self.pv.best_move() {
                best_move = mv;
            }
            self.stats.max_depth_reached = u32::from(depth);
        }

        self.stats.elapsed_sec = self.start_time.elapsed().as_secs_f64();

        if best_move.is_null() {
            if let Some(mv) = generate_all_moves(pos).iter().next() {
                best_move = *mv;
            }
        }

        best_move
    }

    /// Flips the shared stop flag; a search polling it will unwind within
    /// [`constants::NODE_POLL_INTERVAL`] nodes.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// A clone of the stop flag, so callers can request cancellation from
    /// another thread (e.g. a UCI `stop` command listener) while this
    /// `Engine` is borrowed mutably by an in-progress search.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The best line found by the most recent search, root move first.
    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        self.pv.line(0)
    }

    pub fn clear_tt(&self) {
        self.tt.clear();
    }

    pub fn resize_tt(&self, size_mib: usize) {
        self.tt.resize(size_mib);
    }

    #[must_use]
    pub fn tt_capacity(&self) -> usize {
        self.tt.capacity()
    }

    #[must_use]
    pub fn tt_hashfull_permille(&self) -> u32 {
        self.tt.hashfull_permille()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::{from_fen, STARTING_FEN};

    #[test]
    fn a_fresh_search_always_clears_any_stale_stop_request() {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut engine = Engine::new(1);
        engine.request_stop();
        let mv = engine.get_best_move(&mut pos, 4, 0);
        assert!(!mv.is_null());
    }

    #[test]
    fn deeper_search_reports_a_higher_max_depth_reached() {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut engine = Engine::new(1);
        engine.get_best_move(&mut pos, 3, 0);
        assert!(engine.stats().max_depth_reached >= 1);
        assert!(engine.stats().nodes > 0);
    }
}
