//! Property-based tests over randomly-played games: invariants that should
//! hold no matter which legal moves got played to reach a position.

use proptest::prelude::*;
use rand::prelude::*;

use chess_engine::board::fen::{from_fen, to_fen, STARTING_FEN};
use chess_engine::board::movegen::{generate_all_moves, is_in_check};
use chess_engine::board::see::see;
use chess_engine::board::{Move, Position, UnmakeInfo};
use chess_engine::eval::evaluate;
use chess_engine::transposition_table::{Bound, TranspositionTable};

fn play_random_moves(pos: &mut Position, rng: &mut StdRng, count: usize) -> Vec<(Move, UnmakeInfo)> {
    let mut history = Vec::new();
    for _ in 0..count {
        let moves = generate_all_moves(pos);
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = *moves.get(idx).unwrap();
        let info = pos.make_move(mv);
        history.push((mv, info));
    }
    history
}

proptest! {
    /// make_move followed by unmake_move restores the position exactly.
    #[test]
    fn prop_make_unmake_restores_state(seed in any::<u64>(), num_moves in 1..20usize) {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let initial_hash = pos.hash();
        let initial_fen = to_fen(&pos);

        let mut history = play_random_moves(&mut pos, &mut rng, num_moves);
        while let Some((_, info)) = history.pop() {
            pos.unmake_move(info);
        }

        prop_assert_eq!(pos.hash(), initial_hash);
        prop_assert_eq!(to_fen(&pos), initial_fen);
    }

    /// A FEN round-trip through a randomly-reached position preserves the
    /// side to move, castling rights, and en passant square.
    #[test]
    fn prop_fen_roundtrip(seed in any::<u64>(), num_moves in 0..20usize) {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        play_random_moves(&mut pos, &mut rng, num_moves);

        let fen = to_fen(&pos);
        let restored = from_fen(&fen).unwrap();

        prop_assert_eq!(pos.side_to_move(), restored.side_to_move());
        prop_assert_eq!(pos.castling_rights(), restored.castling_rights());
        prop_assert_eq!(pos.en_passant_square(), restored.en_passant_square());
    }

    /// Every move the generator calls legal actually leaves the mover's own
    /// king out of check once played.
    #[test]
    fn prop_legal_moves_never_leave_the_mover_in_check(seed in any::<u64>()) {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = generate_all_moves(&mut pos);
            if moves.is_empty() {
                break;
            }
            let mover = pos.side_to_move();
            for mv in moves.iter().copied() {
                let info = pos.make_move(mv);
                prop_assert!(!is_in_check(&mut pos, mover), "legal move left the mover in check: {:?}", mv);
                pos.unmake_move(info);
            }

            let idx = rng.gen_range(0..moves.len());
            let mv = *moves.get(idx).unwrap();
            pos.make_move(mv);
        }
    }

    /// SEE on an uncontested capture never exceeds (and, for a single
    /// recapture-free exchange, equals) the captured piece's value.
    #[test]
    fn prop_see_bounded_by_victim_value(seed in any::<u64>(), num_moves in 0..15usize) {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        play_random_moves(&mut pos, &mut rng, num_moves);

        for mv in generate_all_moves(&mut pos).iter().copied() {
            if let Some((_, victim)) = pos.piece_at(mv.to()) {
                if mv.is_capture() {
                    prop_assert!(see(&pos, mv) <= victim.value());
                }
            }
        }
    }

    /// The evaluator never returns an implausibly large score from a
    /// reachable middlegame-ish position (bounded well under a mate score).
    #[test]
    fn prop_eval_is_bounded(seed in any::<u64>(), num_moves in 0..30usize) {
        let mut pos = from_fen(STARTING_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        play_random_moves(&mut pos, &mut rng, num_moves);

        prop_assert!(evaluate(&pos).abs() < 10_000);
    }

    /// A transposition-table entry, once stored, comes back with the same
    /// depth, score, and bound that were given to `store` (collisions at the
    /// same index are fine; a wrong-hash probe returning `None` is fine too).
    #[test]
    fn prop_tt_round_trips_or_reports_a_miss(hash in any::<u64>(), depth in 0u8..=63, score in -9999..9999i32) {
        let tt = TranspositionTable::new(1);
        tt.store(hash, depth, score, Bound::Exact, Move::null(), 0);

        if let Some(entry) = tt.probe(hash, 0) {
            prop_assert_eq!(entry.depth, depth);
            prop_assert_eq!(entry.score, score);
        }
    }
}
