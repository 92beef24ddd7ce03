//! Check and checkmate detection
//!
//! - `in_check`: 王手判定
//! - `has_legal_move`: 合法手の有無
//! - `is_checkmate`: 詰み判定
//! - `solver`: 一手詰めソルバー

pub mod solver;

use crate::movegen::MoveGen;
use crate::shogi::attacks::is_attacked;
use crate::shogi::{Board, Side};
use std::borrow::Cow;

/// Whether `side`'s king is attacked. False when that king is absent.
pub fn in_check(board: &Board, side: Side) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| is_attacked(board, king, side.opposite()))
}

/// Whether `side` has at least one legal move
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    let board = with_side_to_move(board, side);
    MoveGen::new(&board).has_legal_move()
}

/// `side` is in check and has no legal move
pub fn is_checkmate(board: &Board, side: Side) -> bool {
    in_check(board, side) && !has_legal_move(board, side)
}

fn with_side_to_move(board: &Board, side: Side) -> Cow<'_, Board> {
    if board.side_to_move() == side {
        Cow::Borrowed(board)
    } else {
        let mut owned = board.clone();
        owned.set_side_to_move(side);
        Cow::Owned(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(sfen: &str) -> Board {
        Board::from_sfen(sfen).unwrap()
    }

    #[test]
    fn test_in_check() {
        let b = board("4k4/4G4/9/9/9/9/9/9/4K4 w - 1");
        assert!(in_check(&b, Side::Gote));
        assert!(!in_check(&b, Side::Sente));
        // no king means no check
        let b = board("9/4G4/9/9/9/9/9/9/4K4 w - 1");
        assert!(!in_check(&b, Side::Gote));
    }

    #[test]
    fn test_checkmate_head_gold() {
        let b = board("4k4/4G4/4P4/9/9/9/9/9/4K4 w - 2");
        assert!(is_checkmate(&b, Side::Gote));
        // evaluation does not depend on the side to move field
        let mut flipped = b.clone();
        flipped.set_side_to_move(Side::Sente);
        assert!(is_checkmate(&flipped, Side::Gote));
    }

    #[test]
    fn test_check_with_escape_is_not_mate() {
        let b = board("4k4/4G4/9/9/9/9/9/9/4K4 w - 2");
        assert!(in_check(&b, Side::Gote));
        assert!(has_legal_move(&b, Side::Gote));
        assert!(!is_checkmate(&b, Side::Gote));
    }

    #[test]
    fn test_no_legal_move_without_check_is_not_mate() {
        // stalemate-like: king boxed in but not attacked
        let b = board("k8/2G6/1G7/9/9/9/9/9/8K w - 1");
        assert!(!in_check(&b, Side::Gote));
        assert!(!is_checkmate(&b, Side::Gote));
    }
}
