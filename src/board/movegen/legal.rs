//! Legality filtering: a pseudo-legal move is legal iff making it does not
//! leave the mover's own king attacked. No pin detection shortcut is used --
//! the make/unmake-and-check approach is simpler to get right and this
//! engine does not need the last few percent of move-generation speed that
//! pin-aware generation would buy.

use crate::board::movegen::attacks::is_in_check;
use crate::board::movegen::pseudo::{generate_pseudo_legal, GenMode};
use crate::board::types::{Move, MoveList};
use crate::board::Position;

pub fn generate_legal(pos: &mut Position, mode: GenMode, out: &mut MoveList) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(pos, mode, &mut pseudo);
    let mover = pos.side_to_move();
    for &mv in pseudo.iter() {
        let info = pos.make_move(mv);
        if !is_in_check(pos, mover) {
            out.push(mv);
        }
        pos.unmake_move(info);
    }
}

#[must_use]
pub fn is_legal_move(pos: &mut Position, mv: Move) -> bool {
    let mover = pos.side_to_move();
    let info = pos.make_move(mv);
    let legal = !is_in_check(pos, mover);
    pos.unmake_move(info);
    legal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::from_fen;

    #[test]
    fn pinned_piece_cannot_move_off_the_pin_line() {
        // White king on e1, white rook on e2 pinned by black rook on e8.
        let fen = "4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1";
        let mut pos = from_fen(fen).unwrap();
        let mut list = MoveList::new();
        generate_legal(&mut pos, GenMode::All, &mut list);
        for mv in list.iter() {
            if mv.from().to_string() == "e2" {
                assert_eq!(mv.to().file(), 4, "pinned rook must stay on the e-file");
            }
        }
    }

    #[test]
    fn king_cannot_move_into_check() {
        let fen = "4k3/8/8/8/8/8/8/4K2r w - - 0 1";
        let mut pos = from_fen(fen).unwrap();
        let mut list = MoveList::new();
        generate_legal(&mut pos, GenMode::All, &mut list);
        assert!(list.iter().all(|m| m.to().to_string() != "f1"));
    }
}
