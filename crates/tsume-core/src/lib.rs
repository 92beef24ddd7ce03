//! # tsume-core
//!
//! 一手詰め（mate-in-1）将棋問題の生成・検証コアライブラリ。
//!
//! ## モジュール構成
//!
//! - `shogi`: 基本型（Side, Square, Piece, Hand, Move）、盤面表現とSFEN、利き計算
//! - `movegen`: 合法手生成（二歩・打ち歩詰め・行き所のない駒・成り強制を含む）
//! - `mate`: 王手判定・詰み判定と一手詰めソルバー
//! - `generate`: 逆算生成（テンプレート）とランダム生成
//! - `quality`: 難易度スコア
//!
//! All computation is synchronous and deterministic; randomness only enters
//! through the seeds passed to the generators.

pub mod generate;
pub mod mate;
pub mod movegen;
pub mod quality;
pub mod shogi;

// Re-export commonly used types
pub use generate::{
    GenerateError, RandomConfig, RandomGenerator, ReverseConfig, ReverseGenerator,
    generate_random, generate_reverse,
};
pub use mate::solver::{VerificationResult, is_mate_in_1, unique_mate, verify};
pub use mate::{has_legal_move, in_check, is_checkmate};
pub use movegen::{MoveGen, MoveList, is_legal, legal_moves};
pub use quality::{Difficulty, DifficultyWeights, QualityCriteria, score};
pub use shogi::{
    Bitboard, Board, Hand, Move, MoveParseError, Piece, PieceType, SfenError, SfenErrorKind,
    Side, Square, StateError,
};
