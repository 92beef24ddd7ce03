//! Text diagram of a position

use std::fmt;
use tsume_core::shogi::HAND_ORDER;
use tsume_core::{Board, Piece, Side, Square};

/// 盤面図: `v` marks Gote pieces, `+` marks promoted pieces
pub struct Diagram<'a>(pub &'a Board);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        writeln!(f, "Gote hand: {}", hand_text(board, Side::Gote))?;
        writeln!(f, "   9   8   7   6   5   4   3   2   1")?;
        writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;

        for rank in 1..=9u8 {
            write!(f, "|")?;
            for file in (1..=9u8).rev() {
                match Square::new(file, rank).and_then(|sq| board.piece_on(sq)) {
                    Some(piece) => write!(f, "{:>3}|", piece_text(piece))?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f, " {}", (b'a' + rank - 1) as char)?;
            writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;
        }

        writeln!(f, "Sente hand: {}", hand_text(board, Side::Sente))?;
        write!(f, "Side to move: {}", board.side_to_move())
    }
}

fn piece_text(piece: Piece) -> String {
    let mut s = String::new();
    if piece.side() == Side::Gote {
        s.push('v');
    }
    if piece.is_promoted() {
        s.push('+');
    }
    s.push(piece.piece_type().to_sfen_char());
    s
}

fn hand_text(board: &Board, side: Side) -> String {
    let hand = board.hand(side);
    let parts: Vec<String> = HAND_ORDER
        .iter()
        .filter(|&&pt| hand.count(pt) > 0)
        .map(|&pt| format!("{}{}", pt.to_sfen_char(), hand.count(pt)))
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}
