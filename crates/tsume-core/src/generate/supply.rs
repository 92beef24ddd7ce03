//! Bounded material (駒の総数)

use crate::shogi::{Board, PieceType};

/// Pieces still available per type, out of one full shogi set
/// (K2 R2 B2 G4 S4 N4 L4 P18). Promoted pieces count as their base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialSupply {
    remaining: [u32; 8],
}

impl Default for MaterialSupply {
    fn default() -> Self {
        Self::full()
    }
}

impl MaterialSupply {
    /// A complete set
    pub fn full() -> Self {
        MaterialSupply {
            remaining: PieceType::ALL.map(|pt| pt.supply()),
        }
    }

    /// What is left after the material already on `board` and in its hands.
    /// None when the board uses more than one set.
    pub fn after(board: &Board) -> Option<Self> {
        let mut supply = Self::full();
        for pt in PieceType::ALL {
            let used = board.material_of(pt);
            let slot = &mut supply.remaining[pt.as_index()];
            *slot = slot.checked_sub(used)?;
        }
        Some(supply)
    }

    /// Whether `board` stays within one set
    pub fn fits(board: &Board) -> bool {
        Self::after(board).is_some()
    }

    pub fn remaining(&self, piece_type: PieceType) -> u32 {
        self.remaining[piece_type.as_index()]
    }

    /// Reserve one piece; false when none is left
    pub fn take(&mut self, piece_type: PieceType) -> bool {
        let slot = &mut self.remaining[piece_type.as_index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Non-king types with at least one piece left
    pub fn available(&self) -> impl Iterator<Item = PieceType> + '_ {
        PieceType::ALL
            .into_iter()
            .filter(move |&pt| pt != PieceType::King && self.remaining(pt) > 0)
    }
}
