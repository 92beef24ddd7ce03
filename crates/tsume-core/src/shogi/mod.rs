//! Shogi board model and rules primitives
//!
//! - `board`: Square, Side, PieceType, Piece, Hand, Bitboard
//! - `position`: Board (盤面 + 手駒 + 手番), SFEN, symmetries
//! - `moves`: Move and USI notation
//! - `attacks`: attack sets per piece
//! - `error`: board state errors

pub mod attacks;
pub mod board;
pub mod error;
pub mod moves;
pub mod position;

pub use board::{Bitboard, HAND_ORDER, Hand, Piece, PieceType, Side, Square};
pub use error::StateError;
pub use moves::{Move, MoveParseError};
pub use position::{Board, SfenError, SfenErrorKind};
