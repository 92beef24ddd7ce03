//! 難易度スコアと品質フィルタ
//!
//! The score is a weighted sum of solver statistics. The weights are a
//! tunable policy; only the direction of each term is fixed.

use crate::mate::solver::{VerificationResult, verify};
use crate::shogi::Board;
use serde::Serialize;

/// Weights of the difficulty terms
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DifficultyWeights {
    pub legal_moves: f64,
    pub checking_moves: f64,
    pub average_responses: f64,
    /// Subtracted once per mating move
    pub mate_moves: f64,
    pub pieces: f64,
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        DifficultyWeights {
            legal_moves: 0.5,
            checking_moves: 0.8,
            average_responses: 1.0,
            mate_moves: 3.0,
            pieces: 0.1,
        }
    }
}

/// Difficulty with the inputs it was computed from
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Difficulty {
    pub difficulty_score: f64,
    pub total_pieces: usize,
    pub legal_moves: usize,
    pub checking_moves: usize,
    pub mate_moves: usize,
    pub average_responses: f64,
}

/// Score with the default weights
pub fn score(verification: &VerificationResult, total_pieces: usize) -> Difficulty {
    score_with(verification, total_pieces, &DifficultyWeights::default())
}

pub fn score_with(
    verification: &VerificationResult,
    total_pieces: usize,
    weights: &DifficultyWeights,
) -> Difficulty {
    let w = weights;
    let difficulty_score = verification.total_legal_moves as f64 * w.legal_moves
        + verification.checking_moves as f64 * w.checking_moves
        + verification.average_responses * w.average_responses
        + total_pieces as f64 * w.pieces
        - verification.mate_count as f64 * w.mate_moves;

    Difficulty {
        difficulty_score,
        total_pieces,
        legal_moves: verification.total_legal_moves,
        checking_moves: verification.checking_moves,
        mate_moves: verification.mate_count,
        average_responses: verification.average_responses,
    }
}

/// Pieces on the board (hands excluded)
pub fn count_pieces(board: &Board) -> usize {
    board.piece_count()
}

/// Solve `board` and score it
pub fn evaluate(board: &Board) -> Difficulty {
    score(&verify(board), count_pieces(board))
}

/// Acceptance filter for generated puzzles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualityCriteria {
    pub require_unique: bool,
    pub min_pieces: usize,
    pub max_pieces: usize,
}

impl Default for QualityCriteria {
    fn default() -> Self {
        QualityCriteria {
            require_unique: true,
            min_pieces: 3,
            max_pieces: 20,
        }
    }
}

impl QualityCriteria {
    /// Mate exists (and is unique when required) with a piece count in range
    pub fn accepts(&self, result: &VerificationResult, pieces: usize) -> bool {
        (self.min_pieces..=self.max_pieces).contains(&pieces)
            && result.is_mate
            && (!self.require_unique || result.is_unique)
    }
}

/// Solve `board` and apply `criteria` to its material count
pub fn is_quality_position(board: &Board, criteria: &QualityCriteria) -> bool {
    criteria.accepts(&verify(board), board.material_count())
}
