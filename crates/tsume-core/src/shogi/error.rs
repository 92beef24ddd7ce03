//! Board state errors

use super::board::{PieceType, Side, Square};

/// Errors raised at the boundary that would otherwise create an
/// inconsistent position.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{0} has no king on the board")]
    MissingKing(Side),

    #[error("{0} has more than one king on the board")]
    ExtraKing(Side),

    #[error("a king cannot be held in hand")]
    KingInHand,

    #[error("too many {0:?} in hand")]
    HandOverflow(PieceType),

    #[error("{side} has no {piece_type:?} in hand")]
    EmptyHand { side: Side, piece_type: PieceType },

    #[error("no piece on {0}")]
    NoPieceToMove(Square),

    #[error("piece on {0} does not belong to the side to move")]
    NotOwnPiece(Square),

    #[error("destination {0} is occupied by a friendly piece")]
    FriendlyCapture(Square),

    #[error("drop target {0} is occupied")]
    OccupiedDrop(Square),

    #[error("piece on {0} cannot promote")]
    CannotPromote(Square),
}
