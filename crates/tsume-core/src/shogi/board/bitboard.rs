//! Bitboard implementation for 81-square shogi board

use super::types::Square;
use std::ops::BitOr;

/// Bitboard representation (81 bits used, bit i = square index i)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u128);

impl Bitboard {
    /// Empty bitboard
    pub const EMPTY: Self = Bitboard(0);

    /// Set bit at square
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    /// Test if bit is set
    #[inline]
    pub const fn test(&self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    /// Check if bitboard is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Count set bits
    #[inline]
    pub const fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Get least significant bit position
    #[inline]
    pub fn lsb(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as usize)
        }
    }

    /// Pop least significant bit
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Iterate over set squares in ascending index order
    #[inline]
    pub fn squares(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over the squares of a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bitboard:")?;
        for rank in 1..=9u8 {
            for file in (1..=9u8).rev() {
                let set = Square::new(file, rank).is_some_and(|sq| self.test(sq));
                write!(f, "{}", if set { " X" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
