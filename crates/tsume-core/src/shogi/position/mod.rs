//! Board position (盤面 + 手駒 + 手番 + 手数)

mod sfen;


pub use sfen::{SfenError, SfenErrorKind, parse, serialize};

use super::board::{BOARD_SQUARES, Hand, Piece, PieceType, Side, Square};
use super::error::StateError;
use super::moves::Move;

/// A complete position.
///
/// The board holds no movement rules; it only keeps material consistent.
/// Captured pieces go demoted into the capturer's hand and hand counts
/// never go negative.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SQUARES],
    hands: [Hand; 2],
    side_to_move: Side,
    move_number: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Empty board, Sente to move, move number 1
    pub fn empty() -> Self {
        Board {
            squares: [None; BOARD_SQUARES],
            hands: [Hand::new(); 2],
            side_to_move: Side::Sente,
            move_number: 1,
        }
    }

    /// Parse SFEN text
    pub fn from_sfen(text: &str) -> Result<Board, SfenError> {
        sfen::parse(text)
    }

    /// Serialize to SFEN
    pub fn to_sfen(&self) -> String {
        sfen::serialize(self)
    }

    // ---- queries ----

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }

    #[inline]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn set_move_number(&mut self, n: u32) {
        self.move_number = n.max(1);
    }

    /// Square of the first king of `side` in index order
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|(_, p)| p.piece_type() == PieceType::King)
            .map(|(sq, _)| sq)
    }

    /// Pieces of `side` in ascending square order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied_pieces().filter(move |(_, p)| p.side() == side)
    }

    /// All pieces in ascending square order
    pub fn occupied_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|p| (sq, p)))
    }

    /// Number of pieces on the board (hands excluded)
    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    /// Board pieces plus all hand pieces
    pub fn material_count(&self) -> usize {
        self.hands
            .iter()
            .fold(self.piece_count(), |acc, h| acc.saturating_add(h.total() as usize))
    }

    /// Count of `piece_type` on the board and in both hands, promoted or not
    pub fn material_of(&self, piece_type: PieceType) -> u32 {
        let on_board = self
            .squares
            .iter()
            .flatten()
            .filter(|p| p.piece_type() == piece_type)
            .count() as u32;
        self.hands
            .iter()
            .fold(on_board, |acc, h| acc.saturating_add(h.count(piece_type)))
    }

    /// Whether `side` already has an unpromoted pawn on `file` (二歩判定)
    pub fn has_unpromoted_pawn_on_file(&self, side: Side, file: u8) -> bool {
        (1..=9).filter_map(|rank| Square::new(file, rank)).any(|sq| {
            self.piece_on(sq).is_some_and(|p| {
                p.side() == side && p.piece_type() == PieceType::Pawn && !p.is_promoted()
            })
        })
    }

    /// Exactly one king per side
    pub fn validate(&self) -> Result<(), StateError> {
        for side in Side::ALL {
            let kings = self
                .pieces(side)
                .filter(|(_, p)| p.piece_type() == PieceType::King)
                .count();
            match kings {
                0 => return Err(StateError::MissingKing(side)),
                1 => {}
                _ => return Err(StateError::ExtraKing(side)),
            }
        }
        Ok(())
    }

    // ---- mutators ----

    /// Put `piece` on `sq`, returning what was there
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.index()].replace(piece)
    }

    /// Clear `sq`, returning what was there
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    pub fn add_to_hand(
        &mut self,
        side: Side,
        piece_type: PieceType,
        n: u32,
    ) -> Result<(), StateError> {
        self.hands[side.index()].add(piece_type, n)
    }

    pub fn take_from_hand(&mut self, side: Side, piece_type: PieceType) -> Result<(), StateError> {
        if self.hands[side.index()].take(piece_type) {
            Ok(())
        } else {
            Err(StateError::EmptyHand { side, piece_type })
        }
    }

    /// Apply a move in place for the side to move.
    ///
    /// Only material consistency is checked here; rule legality belongs to
    /// the move generator. On error the board is left unchanged.
    pub fn do_move(&mut self, mv: Move) -> Result<(), StateError> {
        let us = self.side_to_move;
        match mv {
            Move::Normal { from, to, promote } => {
                let piece = self.piece_on(from).ok_or(StateError::NoPieceToMove(from))?;
                if piece.side() != us {
                    return Err(StateError::NotOwnPiece(from));
                }
                if promote && !piece.can_promote() {
                    return Err(StateError::CannotPromote(from));
                }
                let captured = self.piece_on(to);
                if let Some(captured) = captured {
                    if captured.side() == us {
                        return Err(StateError::FriendlyCapture(to));
                    }
                    if captured.piece_type() == PieceType::King {
                        return Err(StateError::KingInHand);
                    }
                }

                self.remove(from);
                if let Some(captured) = captured {
                    self.add_to_hand(us, captured.piece_type(), 1)?;
                }
                let moved = if promote { piece.promote() } else { piece };
                self.place(to, moved);
            }
            Move::Drop { piece_type, to } => {
                if self.piece_on(to).is_some() {
                    return Err(StateError::OccupiedDrop(to));
                }
                self.take_from_hand(us, piece_type)?;
                self.place(to, Piece::new(piece_type, us));
            }
        }
        self.side_to_move = us.opposite();
        self.move_number = self.move_number.saturating_add(1);
        Ok(())
    }

    /// Pure form of [`Board::do_move`]
    pub fn apply(&self, mv: Move) -> Result<Board, StateError> {
        let mut next = self.clone();
        next.do_move(mv)?;
        Ok(next)
    }

    // ---- symmetries ----

    /// Left-right mirror (file f becomes 10 - f)
    pub fn mirrored(&self) -> Board {
        let mut out = Board {
            squares: [None; BOARD_SQUARES],
            ..self.clone()
        };
        for (sq, piece) in self.occupied_pieces() {
            out.place(sq.mirror(), piece);
        }
        out
    }

    /// 180 degree turn with colours swapped (先後反転)
    pub fn rotated(&self) -> Board {
        let mut out = Board {
            squares: [None; BOARD_SQUARES],
            hands: [self.hands[1], self.hands[0]],
            side_to_move: self.side_to_move.opposite(),
            move_number: self.move_number,
        };
        for (sq, piece) in self.occupied_pieces() {
            out.place(sq.rotate(), piece.flip_side());
        }
        out
    }
}
