//! Attack sets (利き)
//!
//! Offsets are written from Sente's point of view (forward = rank - 1) and
//! negated for Gote.

use super::board::{Bitboard, Piece, PieceType, Side, Square};
use super::position::Board;

type Offset = (i8, i8);

const KING_STEPS: &[Offset] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const GOLD_STEPS: &[Offset] = &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const SILVER_STEPS: &[Offset] = &[(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
const PAWN_STEPS: &[Offset] = &[(0, -1)];
const KNIGHT_JUMPS: &[Offset] = &[(-1, -2), (1, -2)];
const ORTHOGONAL: &[Offset] = &[(0, -1), (-1, 0), (1, 0), (0, 1)];
const DIAGONAL: &[Offset] = &[(-1, -1), (1, -1), (-1, 1), (1, 1)];
const FORWARD: &[Offset] = &[(0, -1)];

/// Movement pattern of one (PieceType, promoted) pair
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    /// One-square (or knight) jumps
    pub steps: &'static [Offset],
    /// Rays walked until blocked
    pub slides: &'static [Offset],
}

/// 駒の動き (flat lookup on piece type and promotion flag)
pub const fn movement(piece_type: PieceType, promoted: bool) -> Movement {
    const NONE: &[Offset] = &[];
    let (steps, slides) = match (piece_type, promoted) {
        (PieceType::King, _) => (KING_STEPS, NONE),
        (PieceType::Rook, false) => (NONE, ORTHOGONAL),
        (PieceType::Rook, true) => (KING_STEPS, ORTHOGONAL),
        (PieceType::Bishop, false) => (NONE, DIAGONAL),
        (PieceType::Bishop, true) => (KING_STEPS, DIAGONAL),
        (PieceType::Gold, _) => (GOLD_STEPS, NONE),
        (PieceType::Silver, false) => (SILVER_STEPS, NONE),
        (PieceType::Knight, false) => (KNIGHT_JUMPS, NONE),
        (PieceType::Lance, false) => (NONE, FORWARD),
        (PieceType::Pawn, false) => (PAWN_STEPS, NONE),
        (PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn, true) => {
            (GOLD_STEPS, NONE)
        }
    };
    Movement { steps, slides }
}

#[inline]
fn orient((df, dr): Offset, side: Side) -> Offset {
    let s = side.sign();
    (df * s, dr * s)
}

/// Squares `piece` standing on `from` attacks, friendly squares excluded.
///
/// Sliders stop on the first occupied square and include it when it holds
/// an enemy piece.
pub fn attacks_from(board: &Board, piece: Piece, from: Square) -> Bitboard {
    let side = piece.side();
    let Movement { steps, slides } = movement(piece.piece_type(), piece.is_promoted());
    let mut bb = Bitboard::EMPTY;

    for &offset in steps {
        let (df, dr) = orient(offset, side);
        if let Some(to) = from.offset(df, dr) {
            if board.piece_on(to).is_none_or(|p| p.side() != side) {
                bb.set(to);
            }
        }
    }

    for &offset in slides {
        let (df, dr) = orient(offset, side);
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match board.piece_on(to) {
                None => bb.set(to),
                Some(p) => {
                    if p.side() != side {
                        bb.set(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }

    bb
}

/// Squares of `by` pieces attacking `sq`
pub fn attackers_to(board: &Board, sq: Square, by: Side) -> Bitboard {
    board
        .pieces(by)
        .filter(|&(from, piece)| attacks_from(board, piece, from).test(sq))
        .map(|(from, _)| from)
        .collect()
}

/// Whether any `by` piece attacks `sq`
pub fn is_attacked(board: &Board, sq: Square, by: Side) -> bool {
    board
        .pieces(by)
        .any(|(from, piece)| attacks_from(board, piece, from).test(sq))
}

/// Union of all squares attacked by `side`
pub fn attacked_squares(board: &Board, side: Side) -> Bitboard {
    board
        .pieces(side)
        .fold(Bitboard::EMPTY, |acc, (from, piece)| acc | attacks_from(board, piece, from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn targets(sfen: &str, from: &str) -> Vec<String> {
        let board = Board::from_sfen(sfen).unwrap();
        let piece = board.piece_on(sq(from)).unwrap();
        attacks_from(&board, piece, sq(from)).squares().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gold_pattern_both_sides() {
        assert_eq!(
            targets("9/9/9/9/4G4/9/9/9/9 b - 1", "5e"),
            vec!["6d", "5d", "4d", "6e", "4e", "5f"]
        );
        assert_eq!(
            targets("9/9/9/9/4g4/9/9/9/9 b - 1", "5e"),
            vec!["5d", "6e", "4e", "6f", "5f", "4f"]
        );
    }

    #[test]
    fn test_promoted_minor_pieces_move_like_gold() {
        let gold = targets("9/9/9/9/4G4/9/9/9/9 b - 1", "5e");
        for letter in ["+S", "+N", "+L", "+P"] {
            let sfen = format!("9/9/9/9/4{letter}4/9/9/9/9 b - 1");
            assert_eq!(targets(&sfen, "5e"), gold, "{letter}");
        }
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        assert_eq!(targets("9/9/9/3ppp3/4N4/9/9/9/9 b - 1", "5e"), vec!["6c", "4c"]);
        assert_eq!(targets("9/9/9/9/4n4/9/9/9/9 b - 1", "5e"), vec!["6g", "4g"]);
        assert!(targets("9/4N4/9/9/9/9/9/9/9 b - 1", "5b").is_empty());
    }

    #[test]
    fn test_sliders_stop_on_blockers() {
        // lance: stops before own piece, includes enemy piece
        assert_eq!(targets("9/9/4P4/9/4L4/9/9/9/9 b - 1", "5e"), vec!["5d"]);
        assert_eq!(targets("9/9/4p4/9/4L4/9/9/9/9 b - 1", "5e"), vec!["5c", "5d"]);
        let rook = targets("9/9/9/9/R3p4/9/9/9/9 b - 1", "9e");
        assert!(rook.contains(&"5e".to_string()));
        assert!(!rook.contains(&"4e".to_string()));
        assert_eq!(rook.len(), 8 + 4);
    }

    #[test]
    fn test_dragon_and_horse_add_king_steps() {
        let dragon = targets("9/9/9/9/4+R4/9/9/9/9 b - 1", "5e");
        assert_eq!(dragon.len(), 16 + 4);
        let horse = targets("9/9/9/9/4+B4/9/9/9/9 b - 1", "5e");
        assert_eq!(horse.len(), 16 + 4);
        assert!(horse.contains(&"5d".to_string()));
    }

    #[test]
    fn test_attack_queries() {
        let board = Board::from_sfen("8k/9/7GG/9/9/9/9/9/K8 b - 1").unwrap();
        assert!(is_attacked(&board, sq("1b"), Side::Sente));
        assert!(!is_attacked(&board, sq("1a"), Side::Sente));
        let attackers = attackers_to(&board, sq("2b"), Side::Sente);
        assert_eq!(attackers.count_ones(), 2);
        assert!(attacked_squares(&board, Side::Gote).test(sq("2a")));
        assert!(attacked_squares(&board, Side::Gote).test(sq("1b")));
    }
}
