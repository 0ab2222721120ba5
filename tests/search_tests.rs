//! Search tests: verify the engine finds correct moves in tactical and
//! endgame positions, and that the usual draw/mate bookkeeping holds up
//! through a full iterative-deepening search rather than just movegen.

use std::time::Instant;

use chess_engine::board::fen::{from_fen, STARTING_FEN};
use chess_engine::board::movegen::{generate_all_moves, is_checkmate, is_stalemate};
use chess_engine::search::Engine;
use chess_engine::uci::format_uci_move;

#[test]
fn finds_mate_in_one_back_rank() {
    let mut pos = from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut engine = Engine::new(16);

    let mv = engine.get_best_move(&mut pos, 4, 0);
    assert!(!mv.is_null(), "should find a move");
    assert_eq!(format_uci_move(mv), "e1e8", "should find Qe8# (back rank mate)");
}

#[test]
fn avoids_hanging_the_queen() {
    let mut pos = from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3").unwrap();
    let mut engine = Engine::new(16);

    let mv = engine.get_best_move(&mut pos, 4, 0);
    assert!(!mv.is_null(), "should find a move");
    assert_ne!(format_uci_move(mv), "f3c6", "should not hang the queen on c6");
}

#[test]
fn captures_a_free_bishop() {
    let mut pos = from_fen("rnbqk1nr/pppp1ppp/2b5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4").unwrap();
    let mut engine = Engine::new(16);

    let mv = engine.get_best_move(&mut pos, 4, 0);
    assert!(!mv.is_null(), "should find a move");
    assert!(
        mv.is_capture() || format_uci_move(mv) == "c4f7",
        "should capture material or threaten the king: got {}",
        format_uci_move(mv)
    );
}

#[test]
fn iterative_deepening_always_returns_a_legal_move() {
    let mut pos = from_fen(STARTING_FEN).unwrap();
    let mut engine = Engine::new(16);

    let shallow = engine.get_best_move(&mut pos, 2, 0);
    let deeper = engine.get_best_move(&mut pos, 4, 0);

    let legal = generate_all_moves(&mut pos);
    assert!(legal.iter().any(|m| *m == shallow));
    assert!(legal.iter().any(|m| *m == deeper));
}

#[test]
fn single_legal_move_is_found_immediately() {
    // White king on a1, only legal move is Ka2.
    let mut pos = from_fen("8/8/8/8/8/8/8/K6rk w - - 0 1").unwrap();
    let mut engine = Engine::new(16);

    let mv = engine.get_best_move(&mut pos, 4, 0);
    assert_eq!(format_uci_move(mv), "a1a2");
}

#[test]
fn returns_null_move_in_checkmate() {
    let mut pos = from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1").unwrap();
    assert!(is_checkmate(&mut pos), "position should already be checkmate");

    let mut engine = Engine::new(16);
    let mv = engine.get_best_move(&mut pos, 4, 0);
    assert!(mv.is_null(), "no move should come back from a mated position");
}

#[test]
fn identifies_stalemate() {
    let mut pos = from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(is_stalemate(&mut pos));
    assert!(!is_checkmate(&mut pos));
}

#[test]
fn fifty_move_rule_is_a_draw() {
    let pos = from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1").unwrap();
    assert!(pos.is_draw());
}

#[test]
fn search_completes_well_within_a_generous_time_budget() {
    let mut pos = from_fen(STARTING_FEN).unwrap();
    let mut engine = Engine::new(16);

    let start = Instant::now();
    let mv = engine.get_best_move(&mut pos, 5, 0);
    let elapsed = start.elapsed();

    assert!(!mv.is_null());
    assert!(elapsed.as_secs() < 60, "depth-5 search from startpos took too long: {:?}", elapsed);
}

#[test]
fn a_time_limit_is_honored_even_mid_iteration() {
    let mut pos = from_fen(STARTING_FEN).unwrap();
    let mut engine = Engine::new(16);

    let start = Instant::now();
    let mv = engine.get_best_move(&mut pos, 60, 50);
    let elapsed = start.elapsed();

    assert!(!mv.is_null(), "a severely time-limited search should still return a move");
    assert!(elapsed.as_millis() < 2000, "search overran its time limit by far too much: {:?}", elapsed);
}
