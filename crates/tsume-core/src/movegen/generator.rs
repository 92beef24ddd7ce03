//! Pseudo-legal generation and the legality filter

use super::MoveList;
use super::drops::{generate_drops, is_pawn_drop_mate};
use crate::mate::in_check;
use crate::shogi::attacks::attacks_from;
use crate::shogi::{Board, Move, Side};

/// Move generator for the side to move of a borrowed board
pub struct MoveGen<'a> {
    board: &'a Board,
    us: Side,
}

impl<'a> MoveGen<'a> {
    pub fn new(board: &'a Board) -> Self {
        MoveGen {
            board,
            us: board.side_to_move(),
        }
    }

    /// Board moves and drops before the self-check and uchifuzume filter.
    ///
    /// Forced promotion, dead-square drops and nifu are already applied.
    pub fn generate_pseudo_legal(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_board_moves(&mut moves);
        generate_drops(self.board, self.us, &mut moves);
        moves
    }

    /// Legal moves in generation order
    pub fn generate_legal(&self) -> MoveList {
        let mut moves = self.generate_pseudo_legal();
        moves.retain(|mv| self.is_legal_candidate(*mv));
        moves
    }

    /// Short-circuiting legal move existence
    pub fn has_legal_move(&self) -> bool {
        self.generate_pseudo_legal()
            .into_iter()
            .any(|mv| self.is_legal_candidate(mv))
    }

    /// Legality of a pseudo-legal candidate: the mover's king is not left
    /// attacked and a pawn drop does not deliver mate.
    pub(crate) fn is_legal_candidate(&self, mv: Move) -> bool {
        let Ok(next) = self.board.apply(mv) else {
            return false;
        };
        if in_check(&next, self.us) {
            return false;
        }
        !is_pawn_drop_mate(self.board, &next, mv)
    }

    fn generate_board_moves(&self, moves: &mut MoveList) {
        let us = self.us;
        for (from, piece) in self.board.pieces(us) {
            let from_in_zone = us.in_promotion_zone(from.rank());
            for to in attacks_from(self.board, piece, from).squares() {
                let may_promote =
                    piece.can_promote() && (from_in_zone || us.in_promotion_zone(to.rank()));
                // 行き所のない駒は成り必須
                if !piece.is_dead_on(to.rank()) {
                    moves.push(Move::normal(from, to, false));
                }
                if may_promote {
                    moves.push(Move::normal(from, to, true));
                }
            }
        }
    }
}
