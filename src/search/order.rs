//! Move ordering: TT move, MVV-LVA captures, promotions, killer moves, and
//! the history heuristic, plus the killer/history tables themselves.

use crate::board::{Color, Move, MoveList, Piece, Position};
use crate::search::constants::{
    piece_order_value, CAPTURE_BASE_SCORE, HISTORY_MAX, KILLER_1_SCORE, KILLER_2_SCORE, MAX_PLY,
    PROMOTION_BASE_SCORE, TT_MOVE_SCORE,
};

/// Two killer slots per ply: quiet moves that caused a beta cutoff there in
/// a sibling line, tried early since they're likely good again.
pub struct KillerTable {
    killers: Box<[[Move; 2]; MAX_PLY]>,
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable { killers: Box::new([[Move::null(); 2]; MAX_PLY]) }
    }

    pub fn clear(&mut self) {
        *self.killers = [[Move::null(); 2]; MAX_PLY];
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.killers[ply][0]
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.killers[ply][1]
    }

    /// Shift the existing primary killer down and install `mv` as the new
    /// primary, unless it's already the primary (no-op, avoids duplicates).
    pub fn record(&mut self, ply: usize, mv: Move) {
        if self.killers[ply][0] == mv {
            return;
        }
        self.killers[ply][1] = self.killers[ply][0];
        self.killers[ply][0] = mv;
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        KillerTable::new()
    }
}

/// `history[color][from][to]`, incremented by `depth^2` on a quiet cutoff
/// and halved across the board whenever any entry crosses [`HISTORY_MAX`].
pub struct HistoryTable {
    history: Box<[[[i32; 64]; 64]; 2]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable { history: Box::new([[[0; 64]; 64]; 2]) }
    }

    /// Per the design notes, history may be retained or halved between
    /// searches rather than fully cleared; this halves it.
    pub fn decay(&mut self) {
        for color in self.history.iter_mut() {
            for row in color.iter_mut() {
                for entry in row.iter_mut() {
                    *entry /= 2;
                }
            }
        }
    }

    #[must_use]
    pub fn score(&self, color: Color, mv: Move) -> i32 {
        self.history[color.index()][mv.from().as_index()][mv.to().as_index()]
    }

    pub fn record(&mut self, color: Color, mv: Move, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.history[color.index()][mv.from().as_index()][mv.to().as_index()];
        *entry += bonus;
        if *entry > HISTORY_MAX {
            for c in self.history.iter_mut() {
                for row in c.iter_mut() {
                    for e in row.iter_mut() {
                        *e /= 2;
                    }
                }
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        HistoryTable::new()
    }
}

/// Score `mv` for move ordering: TT move > MVV-LVA captures > promotions >
/// killers > history, highest first.
#[must_use]
pub fn score_move(
    pos: &Position,
    mv: Move,
    tt_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> i32 {
    if mv == tt_move {
        return TT_MOVE_SCORE;
    }

    if mv.is_capture() {
        let victim_value = if mv.is_en_passant() {
            piece_order_value(Piece::Pawn)
        } else {
            pos.piece_at(mv.to()).map_or(0, |(_, p)| piece_order_value(p))
        };
        let (_, attacker) = pos.piece_at(mv.from()).expect("scored move has a mover");
        return CAPTURE_BASE_SCORE + 10 * victim_value - piece_order_value(attacker);
    }

    if let Some(promo) = mv.promotion_piece() {
        return PROMOTION_BASE_SCORE + piece_order_value(promo);
    }

    if mv == killers.primary(ply) {
        return KILLER_1_SCORE;
    }
    if mv == killers.secondary(ply) {
        return KILLER_2_SCORE;
    }

    history.score(pos.side_to_move(), mv)
}

/// Score every move in `moves` into a fixed-capacity scored list, ready for
/// the search's pick-highest-first selection sort.
#[must_use]
pub(crate) fn scored(
    pos: &Position,
    moves: &MoveList,
    tt_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) -> crate::board::types::ScoredMoveList {
    let mut out = crate::board::types::ScoredMoveList::new();
    for mv in moves.iter().copied() {
        let score = score_move(pos, mv, tt_move, killers, history, ply);
        out.push(mv, score);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::from_fen;
    use crate::board::Square;

    #[test]
    fn tt_move_outranks_everything_else() {
        let pos = from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let capture = Move::capture(Square::new(3, 4), Square::new(4, 3));
        let killers = KillerTable::new();
        let history = HistoryTable::new();
        let score = score_move(&pos, capture, capture, &killers, &history, 0);
        assert_eq!(score, crate::search::constants::TT_MOVE_SCORE);
    }

    #[test]
    fn capture_of_higher_value_piece_scores_above_capture_of_lower_value() {
        let pos = from_fen("4k3/3qr3/8/8/4R3/8/8/4K3 b - - 0 1").unwrap();
        let take_rook = Move::capture(Square::new(6, 4), Square::new(3, 4));
        let killers = KillerTable::new();
        let history = HistoryTable::new();
        let score = score_move(&pos, take_rook, Move::null(), &killers, &history, 0);
        assert!(score > crate::search::constants::CAPTURE_BASE_SCORE);
    }

    #[test]
    fn killer_table_shifts_on_new_record() {
        let mut killers = KillerTable::new();
        let a = Move::quiet(Square::new(0, 0), Square::new(1, 0));
        let b = Move::quiet(Square::new(0, 1), Square::new(1, 1));
        killers.record(3, a);
        killers.record(3, b);
        assert_eq!(killers.primary(3), b);
        assert_eq!(killers.secondary(3), a);
    }

    #[test]
    fn history_halves_once_any_entry_exceeds_the_cap() {
        let mut history = HistoryTable::new();
        let mv = Move::quiet(Square::new(0, 0), Square::new(1, 0));
        for _ in 0..200 {
            history.record(Color::White, mv, 10);
        }
        assert!(history.score(Color::White, mv) <= crate::search::constants::HISTORY_MAX);
    }
}
