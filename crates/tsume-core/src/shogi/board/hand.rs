//! Pieces in hand (持ち駒)

use super::types::{HAND_ORDER, PieceType};
use crate::shogi::error::StateError;

/// Hand counts indexed by `PieceType::hand_index` (R, B, G, S, N, L, P)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hand {
    counts: [u32; 7],
}

impl Hand {
    /// Empty hand
    pub const fn new() -> Self {
        Hand { counts: [0; 7] }
    }

    /// Number of pieces of the given type (King is always 0)
    #[inline]
    pub fn count(&self, piece_type: PieceType) -> u32 {
        piece_type.hand_index().map_or(0, |i| self.counts[i])
    }

    #[inline]
    pub fn has(&self, piece_type: PieceType) -> bool {
        self.count(piece_type) > 0
    }

    /// Add `n` pieces. Kings cannot be held.
    pub fn add(&mut self, piece_type: PieceType, n: u32) -> Result<(), StateError> {
        let idx = piece_type.hand_index().ok_or(StateError::KingInHand)?;
        self.counts[idx] = self.counts[idx]
            .checked_add(n)
            .ok_or(StateError::HandOverflow(piece_type))?;
        Ok(())
    }

    /// Remove one piece. Returns false when none is held.
    pub fn take(&mut self, piece_type: PieceType) -> bool {
        match piece_type.hand_index() {
            Some(idx) if self.counts[idx] > 0 => {
                self.counts[idx] -= 1;
                true
            }
            _ => false,
        }
    }

    /// Total number of pieces held (saturating)
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, &c| acc.saturating_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in hand order
    pub fn iter(&self) -> impl Iterator<Item = (PieceType, u32)> + '_ {
        HAND_ORDER
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, c)| **c > 0)
            .map(|(pt, c)| (*pt, *c))
    }

    /// Piece types present, in hand order
    pub fn kinds(&self) -> impl Iterator<Item = PieceType> + '_ {
        self.iter().map(|(pt, _)| pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_add_take() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.add(PieceType::Pawn, 2).unwrap();
        hand.add(PieceType::Gold, 1).unwrap();
        assert_eq!(hand.count(PieceType::Pawn), 2);
        assert_eq!(hand.total(), 3);
        assert!(hand.take(PieceType::Gold));
        assert!(!hand.has(PieceType::Gold));
        assert!(!hand.take(PieceType::Gold));
        assert!(!hand.take(PieceType::King));
    }

    #[test]
    fn test_king_cannot_be_held() {
        let mut hand = Hand::new();
        assert_eq!(hand.add(PieceType::King, 1), Err(StateError::KingInHand));
        assert_eq!(hand.count(PieceType::King), 0);
    }

    #[test]
    fn test_add_rejects_overflow() {
        let mut hand = Hand::new();
        hand.add(PieceType::Pawn, u32::MAX).unwrap();
        assert_eq!(
            hand.add(PieceType::Pawn, 2),
            Err(StateError::HandOverflow(PieceType::Pawn))
        );
        assert_eq!(hand.count(PieceType::Pawn), u32::MAX);

        hand.add(PieceType::Gold, u32::MAX).unwrap();
        assert_eq!(hand.total(), u32::MAX);
    }

    #[test]
    fn test_iter_follows_hand_order() {
        let mut hand = Hand::new();
        hand.add(PieceType::Pawn, 3).unwrap();
        hand.add(PieceType::Rook, 1).unwrap();
        hand.add(PieceType::Silver, 2).unwrap();
        let entries: Vec<_> = hand.iter().collect();
        assert_eq!(
            entries,
            vec![(PieceType::Rook, 1), (PieceType::Silver, 2), (PieceType::Pawn, 3)]
        );
    }
}
