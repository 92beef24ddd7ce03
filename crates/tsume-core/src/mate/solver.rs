//! 一手詰めソルバー
//!
//! Enumerates every legal move of the side to move, applies it and checks
//! whether the opponent is left in check with no legal reply.

use super::in_check;
use crate::movegen::{MoveGen, legal_moves};
use crate::shogi::{Board, Move};
use log::debug;
use serde::Serialize;

/// Mate-in-1 analysis of a position
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VerificationResult {
    pub is_mate: bool,
    pub is_unique: bool,
    /// Mating moves in generation order
    pub mate_moves: Vec<Move>,
    pub mate_count: usize,
    pub total_legal_moves: usize,
    pub checking_moves: usize,
    /// Mean number of legal replies over the checking moves (0.0 when none)
    pub average_responses: f64,
}

/// Analyse `board` for the side to move
pub fn verify(board: &Board) -> VerificationResult {
    let us = board.side_to_move();
    let them = us.opposite();
    let moves = legal_moves(board);

    let mut mate_moves = Vec::new();
    let mut checking_moves = 0usize;
    let mut total_responses = 0usize;

    for &mv in &moves {
        let Ok(next) = board.apply(mv) else {
            continue;
        };
        if !in_check(&next, them) {
            continue;
        }
        checking_moves += 1;
        let responses = MoveGen::new(&next).generate_legal().len();
        total_responses += responses;
        if responses == 0 {
            mate_moves.push(mv);
        }
    }

    let average_responses = if checking_moves > 0 {
        total_responses as f64 / checking_moves as f64
    } else {
        0.0
    };
    let mate_count = mate_moves.len();

    debug!(
        "verify {}: legal={} checks={} mates={}",
        board.to_sfen(),
        moves.len(),
        checking_moves,
        mate_count
    );

    VerificationResult {
        is_mate: mate_count > 0,
        is_unique: mate_count == 1,
        mate_moves,
        mate_count,
        total_legal_moves: moves.len(),
        checking_moves,
        average_responses,
    }
}

/// Whether the legal move `mv` mates immediately
pub fn is_mate_in_1(board: &Board, mv: Move) -> bool {
    if !crate::movegen::is_legal(board, mv) {
        return false;
    }
    board
        .apply(mv)
        .is_ok_and(|next| super::is_checkmate(&next, next.side_to_move()))
}

/// The mating move when exactly one exists
pub fn unique_mate(board: &Board) -> Option<Move> {
    let result = verify(board);
    if result.is_unique {
        result.mate_moves.first().copied()
    } else {
        None
    }
}
