//! Move generation (指し手生成)
//!
//! Candidates come out in a fixed order: board moves by origin square then
//! destination square (unpromoted before promoted), then drops in hand
//! order by destination square.

mod drops;
mod generator;

#[cfg(test)]
mod tests;

pub use generator::MoveGen;

use crate::shogi::{Board, Move};
use smallvec::SmallVec;

/// Move list, inline up to a typical tsume position's size
pub type MoveList = SmallVec<[Move; 128]>;

/// All legal moves for the side to move
pub fn legal_moves(board: &Board) -> MoveList {
    MoveGen::new(board).generate_legal()
}

/// Whether `mv` is legal for the side to move
pub fn is_legal(board: &Board, mv: Move) -> bool {
    let movegen = MoveGen::new(board);
    movegen.generate_pseudo_legal().contains(&mv) && movegen.is_legal_candidate(mv)
}
