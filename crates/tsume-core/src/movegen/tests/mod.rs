//! Move generation tests


use crate::shogi::{Board, Move};

fn board(sfen: &str) -> Board {
    Board::from_sfen(sfen).unwrap()
}

fn usi(text: &str) -> Move {
    Move::from_usi(text).unwrap()
}

fn usi_list(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to_string()).collect()
}
