//! Drop generation (駒打ち)

use super::MoveList;
use crate::mate::is_checkmate;
use crate::shogi::{Board, Move, Piece, PieceType, Side, Square};

/// Drops for `us` subject to the dead-square and nifu restrictions
pub(super) fn generate_drops(board: &Board, us: Side, moves: &mut MoveList) {
    let hand = *board.hand(us);
    for piece_type in hand.kinds() {
        let piece = Piece::new(piece_type, us);
        for to in Square::all() {
            if board.piece_on(to).is_some() || piece.is_dead_on(to.rank()) {
                continue;
            }
            // 二歩
            if piece_type == PieceType::Pawn && board.has_unpromoted_pawn_on_file(us, to.file()) {
                continue;
            }
            moves.push(Move::drop(piece_type, to));
        }
    }
}

/// 打ち歩詰め: a pawn drop that checks the enemy king and leaves it with no
/// legal reply. `after` is `before` with `mv` applied.
pub(super) fn is_pawn_drop_mate(before: &Board, after: &Board, mv: Move) -> bool {
    let Move::Drop {
        piece_type: PieceType::Pawn,
        to,
    } = mv
    else {
        return false;
    };

    let us = before.side_to_move();
    let them = us.opposite();
    let gives_check = to
        .offset(0, us.forward())
        .and_then(|front| after.piece_on(front))
        .is_some_and(|p| p.side() == them && p.piece_type() == PieceType::King);

    gives_check && is_checkmate(after, them)
}
