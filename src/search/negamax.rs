//! The search tree proper: negamax alpha-beta with principal variation
//! search, null-move pruning, late-move reductions, futility pruning, and
//! transposition-table cutoffs/ordering. Each node runs, in order: stop
//! poll, draw/mate-distance checks, quiescence handoff, TT probe, null-move,
//! move loop with pruning/reductions/PVS, then TT store.

use std::sync::atomic::Ordering;

use crate::board::movegen::{generate_all_moves, is_in_check};
use crate::board::{Color, Move, Piece, Position};
use crate::eval::evaluate;
use crate::search::constants::{
    DRAW_SCORE, FUTILITY_MARGIN, LMR_DEEP_DEPTH_THRESHOLD, LMR_DEEP_MOVE_THRESHOLD,
    LMR_MOVE_THRESHOLD, MATE_SCORE, NULL_MOVE_BASE_REDUCTION, SCORE_INFINITE,
};
use crate::search::order;
use crate::search::Engine;
use crate::transposition_table::Bound;

fn has_non_pawn_material(pos: &Position, side: Color) -> bool {
    [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .any(|p| !pos.pieces_of(side, p).is_empty())
}

impl Engine {
    pub(super) fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if self.time_limit_ms == 0 || self.stats.nodes % crate::search::constants::NODE_POLL_INTERVAL != 0 {
            return false;
        }
        self.start_time.elapsed().as_millis() as u64 >= self.time_limit_ms
    }

    /// Negamax alpha-beta search of `pos` to `depth` plies, returning a
    /// score from `pos`'s side-to-move's perspective.
    pub(super) fn negamax(
        &mut self,
        pos: &mut Position,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
        is_pv: bool,
    ) -> i32 {
        if self.should_stop() {
            self.stopped = true;
            return 0;
        }

        if ply > 0 && pos.is_draw() {
            return DRAW_SCORE;
        }

        alpha = alpha.max(-MATE_SCORE + ply as i32);
        beta = beta.min(MATE_SCORE - ply as i32 - 1);
        if alpha >= beta {
            return alpha;
        }

        if depth <= 0 {
            return self.quiescence(pos, alpha, beta, ply);
        }

        self.stats.nodes += 1;
        let in_check = is_in_check(pos, pos.side_to_move());

        let hash = pos.hash();
        let tt_entry = self.tt.probe(hash, ply);
        let mut tt_move = Move::null();
        if let Some(entry) = tt_entry {
            self.stats.tt_hits += 1;
            tt_move = entry.best_move;
            if !is_pv && i32::from(entry.depth) >= depth {
                let usable = match entry.bound {
                    Bound::Exact => true,
                    Bound::Alpha => entry.score <= alpha,
                    Bound::Beta => entry.score >= beta,
                };
                if usable {
                    return entry.score;
                }
            }
        } else {
            self.stats.tt_misses += 1;
        }

        if !is_pv
            && !in_check
            && ply > 0
            && depth >= 3
            && has_non_pawn_material(pos, pos.side_to_move())
        {
            let r = NULL_MOVE_BASE_REDUCTION as i32 + i32::from(depth > 6);
            let prev_ep = pos.make_null_move();
            let score = -self.negamax(pos, depth - 1 - r, -beta, -beta + 1, ply + 1, false);
            pos.unmake_null_move(prev_ep);
            if self.stopped {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let moves = generate_all_moves(pos);
        if moves.is_empty() {
            return if in_check { -MATE_SCORE + ply as i32 } else { DRAW_SCORE };
        }

        let static_eval = evaluate(pos);
        let mut scored_moves = order::scored(pos, &moves, tt_move, &self.killers, &self.history, ply);

        let mut best_score = -SCORE_INFINITE;
        let mut best_move = Move::null();
        let mut bound = Bound::Alpha;
        let mut move_count = 0usize;
        let mut idx = 0;

        while let Some(candidate) = scored_moves.pick_best(idx) {
            idx += 1;
            let mv = candidate.mv;
            move_count += 1;
            let is_quiet = mv.is_quiet();

            if !is_pv
                && !in_check
                && is_quiet
                && depth <= 3
                && move_count > 1
                && static_eval + FUTILITY_MARGIN[depth as usize] <= alpha
            {
                continue;
            }

            let info = pos.make_move(mv);
            let gives_check = is_in_check(pos, pos.side_to_move());

            let mut reduction = 0;
            if !is_pv && is_quiet && !in_check && !gives_check && depth >= 3 && move_count > LMR_MOVE_THRESHOLD
            {
                reduction = 1;
                if depth >= LMR_DEEP_DEPTH_THRESHOLD as i32 && move_count >= LMR_DEEP_MOVE_THRESHOLD {
                    reduction = 2;
                }
            }

            let score = if is_pv && move_count == 1 {
                -self.negamax(pos, depth - 1, -beta, -alpha, ply + 1, true)
            } else {
                let reduced_depth = (depth - 1 - reduction).max(0);
                let mut s = -self.negamax(pos, reduced_depth, -alpha - 1, -alpha, ply + 1, false);
                if reduction > 0 && s > alpha {
                    s = -self.negamax(pos, depth - 1, -alpha - 1, -alpha, ply + 1, false);
                }
                if s > alpha && s < beta {
                    s = -self.negamax(pos, depth - 1, -beta, -alpha, ply + 1, true);
                }
                s
            };

            pos.unmake_move(info);

            if self.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;

                if score > alpha {
                    alpha = score;
                    bound = Bound::Exact;
                    self.pv.update(ply, mv);

                    if score >= beta {
                        self.stats.beta_cutoffs += 1;
                        if move_count == 1 {
                            self.stats.first_move_cutoffs += 1;
                        }
                        if is_quiet {
                            self.killers.record(ply, mv);
                            self.history.record(pos.side_to_move(), mv, depth.clamp(0, 255) as u8);
                        }
                        self.tt.store(hash, depth.clamp(0, 255) as u8, score, Bound::Beta, mv, ply);
                        return score;
                    }
                }
            }
        }

        self.tt.store(hash, depth.clamp(0, 255) as u8, best_score, bound, best_move, ply);
        best_score
    }
}
