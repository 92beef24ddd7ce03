//! Move representation and USI notation
//!
//! - Normal move: `7g7f`, `8h2b+`
//! - Drop: `P*5e` (piece letter is always uppercase)

use super::board::{PieceType, Square};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A move by the side to move.
///
/// The mover is implied by the position the move is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// 盤上の駒を動かす手
    Normal { from: Square, to: Square, promote: bool },
    /// 駒打ち
    Drop { piece_type: PieceType, to: Square },
}

impl Move {
    #[inline]
    pub const fn normal(from: Square, to: Square, promote: bool) -> Self {
        Move::Normal { from, to, promote }
    }

    #[inline]
    pub const fn drop(piece_type: PieceType, to: Square) -> Self {
        Move::Drop { piece_type, to }
    }

    /// Origin square (None for drops)
    #[inline]
    pub const fn from(&self) -> Option<Square> {
        match *self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    /// Destination square
    #[inline]
    pub const fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    #[inline]
    pub const fn is_promote(&self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    /// Dropped piece type (None for board moves)
    #[inline]
    pub const fn drop_piece_type(&self) -> Option<PieceType> {
        match *self {
            Move::Drop { piece_type, .. } => Some(piece_type),
            Move::Normal { .. } => None,
        }
    }

    /// Parse USI move text
    pub fn from_usi(text: &str) -> Result<Move, MoveParseError> {
        let err = || MoveParseError(text.to_string());
        let chars: Vec<char> = text.chars().collect();

        if chars.len() == 4 && chars[1] == '*' {
            if !chars[0].is_ascii_uppercase() {
                return Err(err());
            }
            let piece_type = PieceType::from_sfen_char(chars[0]).ok_or_else(err)?;
            if piece_type == PieceType::King {
                return Err(err());
            }
            let to = Square::from_usi_chars(chars[2], chars[3]).ok_or_else(err)?;
            return Ok(Move::drop(piece_type, to));
        }

        let promote = match chars.len() {
            4 => false,
            5 if chars[4] == '+' => true,
            _ => return Err(err()),
        };
        let from = Square::from_usi_chars(chars[0], chars[1]).ok_or_else(err)?;
        let to = Square::from_usi_chars(chars[2], chars[3]).ok_or_else(err)?;
        if from == to {
            return Err(err());
        }
        Ok(Move::normal(from, to, promote))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Move::Drop { piece_type, to } => write!(f, "{}*{to}", piece_type.to_sfen_char()),
        }
    }
}

impl std::str::FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_usi(s)
    }
}

/// Malformed USI move text
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid USI move: {0:?}")]
pub struct MoveParseError(pub String);

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Move::from_usi(&text).map_err(serde::de::Error::custom)
    }
}
