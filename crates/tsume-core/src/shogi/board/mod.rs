//! Basic board types
//!
//! ```text
//! Side
//!   ↓
//! Square ← Bitboard
//!   ↓
//! PieceType → Piece
//!   ↓
//! Hand
//! ```

mod bitboard;
mod hand;
mod types;

pub use bitboard::Bitboard;
pub use hand::Hand;
pub use types::{BOARD_SQUARES, HAND_ORDER, Piece, PieceType, Side, Square};
