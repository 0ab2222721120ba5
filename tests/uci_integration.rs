//! Round-trips through the UCI move formatter/parser using positions that
//! require the disambiguation a bare "from-to" pair can't give on its own:
//! promotions, en passant, and castling.

use chess_engine::board::fen::from_fen;
use chess_engine::uci::{format_uci_move, parse_uci_move};

#[test]
fn parses_and_reformats_a_promotion_move() {
    let mut pos = from_fen("8/P6k/8/8/8/8/7p/K7 w - - 0 1").unwrap();
    let mv = parse_uci_move(&mut pos, "a7a8q").unwrap().expect("a7a8q should be legal here");
    assert!(mv.is_promotion());
    assert_eq!(format_uci_move(mv), "a7a8q");
}

#[test]
fn parses_an_en_passant_capture() {
    let mut pos = from_fen("4k3/8/8/8/Pp6/8/8/4K3 b - a3 0 1").unwrap();
    let mv = parse_uci_move(&mut pos, "b4a3").unwrap().expect("b4a3 should be a legal en passant capture");
    assert!(mv.is_en_passant());
}

#[test]
fn parses_kingside_castling() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&mut pos, "e1g1").unwrap().expect("e1g1 should castle kingside");
    assert!(mv.is_king_castle());
}

#[test]
fn rejects_a_move_that_is_not_legal_here() {
    let mut pos = from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    // No piece can reach d4 in one move from this bare-kings position this way.
    let mv = parse_uci_move(&mut pos, "e1e4").unwrap();
    assert!(mv.is_none());
}

#[test]
fn parses_the_null_move_notation() {
    let mut pos = from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mv = parse_uci_move(&mut pos, "0000").unwrap();
    assert_eq!(mv, Some(chess_engine::Move::null()));
}
