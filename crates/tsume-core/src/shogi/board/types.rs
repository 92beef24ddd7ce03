//! Basic types for shogi board representation
//!
//! Square, Side, PieceType and Piece.

use std::fmt;

/// Number of squares on the board
pub const BOARD_SQUARES: usize = 81;

/// Square on shogi board (0-80)
///
/// Index layout follows SFEN reading order: rank 1 first, and within a rank
/// file 9 (left) to file 1 (right).
/// - index 0 = 9a (9一)
/// - index 8 = 1a (1一)
/// - index 80 = 1i (1九)
///
/// `file()` and `rank()` return the shogi numbers 1-9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Number of squares
    pub const NUM: usize = BOARD_SQUARES;

    /// Create square from shogi file and rank (both 1-9)
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file >= 1 && file <= 9 && rank >= 1 && rank <= 9 {
            Some(Square((rank - 1) * 9 + (9 - file)))
        } else {
            None
        }
    }

    /// Create square from index (0-80)
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < BOARD_SQUARES {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// File (1-9, 1 is rightmost from Sente's view)
    #[inline]
    pub const fn file(self) -> u8 {
        9 - self.0 % 9
    }

    /// Rank (1-9, 1 is the top / Gote's back rank)
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 9 + 1
    }

    /// Get index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Square reached by moving `df` files and `dr` ranks, if still on the board
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (1..=9).contains(&file) && (1..=9).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// 180 degree rotation
    #[inline]
    pub const fn rotate(self) -> Square {
        Square(80 - self.0)
    }

    /// Left-right mirror (5筋軸)
    #[inline]
    pub const fn mirror(self) -> Square {
        let rank = self.0 / 9;
        let file_idx = self.0 % 9;
        Square(rank * 9 + (8 - file_idx))
    }

    /// Chebyshev (king step) distance
    #[inline]
    pub fn distance(self, other: Square) -> u8 {
        let df = self.file().abs_diff(other.file());
        let dr = self.rank().abs_diff(other.rank());
        df.max(dr)
    }

    /// Parse USI square notation characters (file '1'-'9', rank 'a'-'i')
    pub fn from_usi_chars(file: char, rank: char) -> Option<Square> {
        let file = file.to_digit(10)? as u8;
        if !('a'..='i').contains(&rank) {
            return None;
        }
        let rank = (rank as u8 - b'a') + 1;
        Square::new(file, rank)
    }

    /// All squares in ascending index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES as u8).map(Square)
    }
}

/// Display square in USI notation (e.g., "5e")
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = (b'a' + self.rank() - 1) as char;
        write!(f, "{}{}", self.file(), rank)
    }
}

impl std::str::FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                Square::from_usi_chars(f, r).ok_or_else(|| format!("Invalid square: {s}"))
            }
            _ => Err(format!("Expected 2 characters, got {s:?}")),
        }
    }
}

/// Side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Side {
    /// 先手 - plays from the bottom (rank 9) toward rank 1
    Sente = 0,
    /// 後手 - plays from the top (rank 1) toward rank 9
    Gote = 1,
}

impl Side {
    /// Both sides, Sente first
    pub const ALL: [Side; 2] = [Side::Sente, Side::Gote];

    /// Get opposite side
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// Index for per-side arrays
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// +1 for Sente, -1 for Gote
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Side::Sente => 1,
            Side::Gote => -1,
        }
    }

    /// Rank delta of one step forward
    #[inline]
    pub const fn forward(self) -> i8 {
        -self.sign()
    }

    /// Whether `rank` lies in this side's promotion zone (敵陣)
    #[inline]
    pub const fn in_promotion_zone(self, rank: u8) -> bool {
        match self {
            Side::Sente => rank <= 3,
            Side::Gote => rank >= 7,
        }
    }

    /// Rank counted from this side's point of view (1 = farthest rank)
    #[inline]
    pub const fn relative_rank(self, rank: u8) -> u8 {
        match self {
            Side::Sente => rank,
            Side::Gote => 10 - rank,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opposite()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Sente => f.write_str("Sente"),
            Side::Gote => f.write_str("Gote"),
        }
    }
}

/// Piece types (8 types)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceType {
    King = 0,   // K
    Rook = 1,   // R
    Bishop = 2, // B
    Gold = 3,   // G
    Silver = 4, // S
    Knight = 5, // N
    Lance = 6,  // L
    Pawn = 7,   // P
}

// 手駒の並び順（SFEN出力順、King を除く 7 種）
pub const HAND_ORDER: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

impl PieceType {
    /// All piece types, King first
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// Get the index of this piece type (0-7)
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Hand array index (King は None)
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::King => None,
            _ => Some(self as usize - 1),
        }
    }

    /// Check if piece can promote
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Rook
                | PieceType::Bishop
                | PieceType::Silver
                | PieceType::Knight
                | PieceType::Lance
                | PieceType::Pawn
        )
    }

    /// Number of ranks at the far edge where the unpromoted piece would have
    /// no move left (行き所のない駒)
    #[inline]
    pub const fn dead_ranks(self) -> u8 {
        match self {
            PieceType::Pawn | PieceType::Lance => 1,
            PieceType::Knight => 2,
            _ => 0,
        }
    }

    /// Total number of pieces of this type in a shogi set
    #[inline]
    pub const fn supply(self) -> u32 {
        match self {
            PieceType::King | PieceType::Rook | PieceType::Bishop => 2,
            PieceType::Gold | PieceType::Silver | PieceType::Knight | PieceType::Lance => 4,
            PieceType::Pawn => 18,
        }
    }

    /// SFEN letter (uppercase)
    #[inline]
    pub const fn to_sfen_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Gold => 'G',
            PieceType::Silver => 'S',
            PieceType::Knight => 'N',
            PieceType::Lance => 'L',
            PieceType::Pawn => 'P',
        }
    }

    /// Parse SFEN letter (case-insensitive)
    #[inline]
    pub const fn from_sfen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'G' => Some(PieceType::Gold),
            'S' => Some(PieceType::Silver),
            'N' => Some(PieceType::Knight),
            'L' => Some(PieceType::Lance),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// Complete piece representation including promoted pieces
///
/// A promoted King or Gold cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    piece_type: PieceType,
    side: Side,
    promoted: bool,
}

impl Piece {
    /// Create unpromoted piece
    #[inline]
    pub const fn new(piece_type: PieceType, side: Side) -> Self {
        Piece {
            piece_type,
            side,
            promoted: false,
        }
    }

    /// Create piece with the given promotion state (None for promoted King/Gold)
    #[inline]
    pub const fn with_promotion(piece_type: PieceType, side: Side, promoted: bool) -> Option<Self> {
        if promoted && !piece_type.can_promote() {
            None
        } else {
            Some(Piece {
                piece_type,
                side,
                promoted,
            })
        }
    }

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        self.piece_type
    }

    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }

    /// Check if piece is promoted
    #[inline]
    pub const fn is_promoted(self) -> bool {
        self.promoted
    }

    /// Whether this piece may still promote
    #[inline]
    pub const fn can_promote(self) -> bool {
        !self.promoted && self.piece_type.can_promote()
    }

    /// Promoted form (unchanged when the piece cannot promote)
    #[inline]
    pub const fn promote(self) -> Self {
        if self.piece_type.can_promote() {
            Piece {
                promoted: true,
                ..self
            }
        } else {
            self
        }
    }

    /// Unpromoted form
    #[inline]
    pub const fn unpromote(self) -> Self {
        Piece {
            promoted: false,
            ..self
        }
    }

    /// Flip piece side
    #[inline]
    pub const fn flip_side(self) -> Self {
        Piece {
            side: self.side.opposite(),
            ..self
        }
    }

    /// Whether the unpromoted piece would be stuck on `rank` (行き所のない駒)
    #[inline]
    pub const fn is_dead_on(self, rank: u8) -> bool {
        !self.promoted && self.side.relative_rank(rank) <= self.piece_type.dead_ranks()
    }

    /// SFEN token ("+p", "K", ...)
    pub fn to_sfen(self) -> String {
        let letter = self.piece_type.to_sfen_char();
        let letter = match self.side {
            Side::Sente => letter,
            Side::Gote => letter.to_ascii_lowercase(),
        };
        if self.promoted {
            format!("+{letter}")
        } else {
            letter.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_operations() {
        let s = sq("5e");
        assert_eq!(s.file(), 5);
        assert_eq!(s.rank(), 5);
        assert_eq!(s.index(), 40);
        assert_eq!(s.to_string(), "5e");
        assert_eq!(s.rotate(), s);
        assert_eq!(s.mirror(), s);
    }

    #[test]
    fn test_square_index_order_follows_sfen_reading_order() {
        assert_eq!(sq("9a").index(), 0);
        assert_eq!(sq("1a").index(), 8);
        assert_eq!(sq("9b").index(), 9);
        assert_eq!(sq("1i").index(), 80);
        assert!(sq("9a") < sq("1a"));
        assert!(sq("1a") < sq("9b"));
    }

    #[test]
    fn test_square_from_usi() {
        assert_eq!(Square::new(7, 7), Some(sq("7g")));
        assert!("0a".parse::<Square>().is_err());
        assert!("5j".parse::<Square>().is_err());
        assert!("5".parse::<Square>().is_err());
        assert!("5ee".parse::<Square>().is_err());
        assert_eq!(Square::new(0, 1), None);
        assert_eq!(Square::new(1, 10), None);
    }

    #[test]
    fn test_square_offset_and_symmetry() {
        assert_eq!(sq("5e").offset(0, -1), Some(sq("5d")));
        assert_eq!(sq("5e").offset(1, 0), Some(sq("6e")));
        assert_eq!(sq("1a").offset(-1, 0), None);
        assert_eq!(sq("1a").offset(0, -1), None);
        assert_eq!(sq("7g").rotate(), sq("3c"));
        assert_eq!(sq("7g").mirror(), sq("3g"));
        assert_eq!(sq("1a").distance(sq("3b")), 2);
    }

    #[test]
    fn test_side() {
        assert_eq!(Side::Sente.opposite(), Side::Gote);
        assert_eq!(!Side::Gote, Side::Sente);
        assert_eq!(Side::Sente.forward(), -1);
        assert_eq!(Side::Gote.forward(), 1);
        assert!(Side::Sente.in_promotion_zone(3));
        assert!(!Side::Sente.in_promotion_zone(4));
        assert!(Side::Gote.in_promotion_zone(7));
        assert!(!Side::Gote.in_promotion_zone(6));
        assert_eq!(Side::Gote.relative_rank(9), 1);
    }

    #[test]
    fn test_piece_promotion_flags() {
        assert!(Piece::with_promotion(PieceType::Gold, Side::Sente, true).is_none());
        assert!(Piece::with_promotion(PieceType::King, Side::Gote, true).is_none());
        let pawn = Piece::new(PieceType::Pawn, Side::Gote);
        assert!(pawn.can_promote());
        assert!(!pawn.promote().can_promote());
        assert_eq!(pawn.promote().unpromote(), pawn);
        assert_eq!(Piece::new(PieceType::Gold, Side::Sente).promote().is_promoted(), false);
        assert_eq!(pawn.promote().to_sfen(), "+p");
        assert_eq!(Piece::new(PieceType::King, Side::Sente).to_sfen(), "K");
    }

    #[test]
    fn test_dead_squares() {
        let knight = Piece::new(PieceType::Knight, Side::Sente);
        assert!(knight.is_dead_on(1));
        assert!(knight.is_dead_on(2));
        assert!(!knight.is_dead_on(3));
        let lance = Piece::new(PieceType::Lance, Side::Gote);
        assert!(lance.is_dead_on(9));
        assert!(!lance.is_dead_on(8));
        assert!(!lance.promote().is_dead_on(9));
        assert!(!Piece::new(PieceType::Silver, Side::Sente).is_dead_on(1));
    }

    #[test]
    fn test_hand_index() {
        assert_eq!(PieceType::King.hand_index(), None);
        for (i, pt) in HAND_ORDER.iter().enumerate() {
            assert_eq!(pt.hand_index(), Some(i));
            assert_eq!(PieceType::from_sfen_char(pt.to_sfen_char()), Some(*pt));
        }
    }
}
