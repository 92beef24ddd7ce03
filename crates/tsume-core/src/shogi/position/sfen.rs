//! SFEN形式の解析・出力
//!
//! `<board> <side> <hand> <move_number>`; all four fields are required.

use super::Board;
use crate::shogi::board::{HAND_ORDER, Piece, PieceType, Side, Square};
use std::fmt;

/// SFENパースエラーの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfenErrorKind {
    /// フィールド数が4でない
    FieldCount,
    /// 段数が9でない
    RowCountMismatch,
    /// 段の幅が9でない
    RowWidthMismatch,
    /// 不明な駒文字、または成れない駒への '+'
    UnknownPieceLetter,
    /// 手番が b / w でない
    BadSideToken,
    /// 手駒の形式が不正
    BadHandToken,
    /// 手数が正の整数でない
    BadMoveNumber,
}

impl fmt::Display for SfenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SfenErrorKind::FieldCount => "expected 4 fields",
            SfenErrorKind::RowCountMismatch => "expected 9 rows",
            SfenErrorKind::RowWidthMismatch => "row width is not 9",
            SfenErrorKind::UnknownPieceLetter => "unknown piece letter",
            SfenErrorKind::BadSideToken => "side to move must be 'b' or 'w'",
            SfenErrorKind::BadHandToken => "invalid hand",
            SfenErrorKind::BadMoveNumber => "move number must be a positive integer",
        };
        f.write_str(s)
    }
}

/// SFENパースエラー: 種別と問題のあるトークン
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid SFEN ({kind}): {token:?}")]
pub struct SfenError {
    pub kind: SfenErrorKind,
    pub token: String,
}

impl SfenError {
    fn new(kind: SfenErrorKind, token: impl Into<String>) -> Self {
        SfenError {
            kind,
            token: token.into(),
        }
    }
}

/// SFEN文字列から盤面を生成
pub fn parse(text: &str) -> Result<Board, SfenError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(SfenError::new(SfenErrorKind::FieldCount, text.trim()));
    }

    let mut board = Board::empty();

    // 1. 盤面
    parse_board(&mut board, parts[0])?;

    // 2. 手番
    let side = match parts[1] {
        "b" => Side::Sente,
        "w" => Side::Gote,
        other => return Err(SfenError::new(SfenErrorKind::BadSideToken, other)),
    };
    board.set_side_to_move(side);

    // 3. 手駒
    parse_hand(&mut board, parts[2])?;

    // 4. 手数
    let move_number: u32 = parts[3]
        .parse()
        .map_err(|_| SfenError::new(SfenErrorKind::BadMoveNumber, parts[3]))?;
    if move_number == 0 {
        return Err(SfenError::new(SfenErrorKind::BadMoveNumber, parts[3]));
    }
    board.set_move_number(move_number);

    Ok(board)
}

fn parse_board(board: &mut Board, field: &str) -> Result<(), SfenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 9 {
        return Err(SfenError::new(SfenErrorKind::RowCountMismatch, field));
    }

    for (rank_idx, row) in rows.iter().enumerate() {
        let rank = rank_idx as u8 + 1;
        let mut width: u32 = 0;
        let mut promoted = false;

        for ch in row.chars() {
            if promoted && !ch.is_ascii_alphabetic() {
                return Err(SfenError::new(SfenErrorKind::UnknownPieceLetter, format!("+{ch}")));
            }
            match ch {
                '1'..='9' => {
                    width += ch as u32 - '0' as u32;
                }
                '+' => promoted = true,
                _ => {
                    let piece_type = PieceType::from_sfen_char(ch)
                        .filter(|_| ch.is_ascii_alphabetic())
                        .ok_or_else(|| piece_token_error(promoted, ch))?;
                    let side = if ch.is_ascii_uppercase() {
                        Side::Sente
                    } else {
                        Side::Gote
                    };
                    let piece = Piece::with_promotion(piece_type, side, promoted)
                        .ok_or_else(|| piece_token_error(promoted, ch))?;
                    promoted = false;

                    width += 1;
                    if width > 9 {
                        return Err(SfenError::new(SfenErrorKind::RowWidthMismatch, *row));
                    }
                    // file 9 is the first column of the row
                    let file = 10 - width as u8;
                    if let Some(sq) = Square::new(file, rank) {
                        board.place(sq, piece);
                    }
                }
            }
            if width > 9 {
                return Err(SfenError::new(SfenErrorKind::RowWidthMismatch, *row));
            }
        }

        if promoted {
            return Err(SfenError::new(SfenErrorKind::UnknownPieceLetter, "+"));
        }
        if width != 9 {
            return Err(SfenError::new(SfenErrorKind::RowWidthMismatch, *row));
        }
    }
    Ok(())
}

fn piece_token_error(promoted: bool, ch: char) -> SfenError {
    let token = if promoted {
        format!("+{ch}")
    } else {
        ch.to_string()
    };
    SfenError::new(SfenErrorKind::UnknownPieceLetter, token)
}

fn parse_hand(board: &mut Board, field: &str) -> Result<(), SfenError> {
    if field == "-" {
        return Ok(());
    }

    let bad = || SfenError::new(SfenErrorKind::BadHandToken, field);
    let mut count: Option<u32> = None;

    for ch in field.chars() {
        if let Some(d) = ch.to_digit(10) {
            let next = count.unwrap_or(0).checked_mul(10).and_then(|c| c.checked_add(d));
            count = Some(next.ok_or_else(bad)?);
            continue;
        }

        let piece_type = PieceType::from_sfen_char(ch)
            .filter(|pt| ch.is_ascii_alphabetic() && *pt != PieceType::King)
            .ok_or_else(bad)?;
        let n = count.take().unwrap_or(1);
        if n == 0 {
            return Err(bad());
        }
        let side = if ch.is_ascii_uppercase() {
            Side::Sente
        } else {
            Side::Gote
        };
        board.add_to_hand(side, piece_type, n).map_err(|_| bad())?;
    }

    if count.is_some() {
        return Err(bad());
    }
    Ok(())
}

/// 盤面をSFEN文字列に変換
pub fn serialize(board: &Board) -> String {
    let mut result = String::new();

    // 1. 盤面
    for rank in 1..=9u8 {
        let mut empty_count = 0;
        for file in (1..=9u8).rev() {
            match Square::new(file, rank).and_then(|sq| board.piece_on(sq)) {
                None => empty_count += 1,
                Some(piece) => {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push_str(&piece.to_sfen());
                }
            }
        }
        if empty_count > 0 {
            result.push_str(&empty_count.to_string());
        }
        if rank < 9 {
            result.push('/');
        }
    }

    // 2. 手番
    result.push(' ');
    result.push(match board.side_to_move() {
        Side::Sente => 'b',
        Side::Gote => 'w',
    });

    // 3. 手駒
    result.push(' ');
    let hand = hand_to_sfen(board);
    if hand.is_empty() {
        result.push('-');
    } else {
        result.push_str(&hand);
    }

    // 4. 手数
    result.push(' ');
    result.push_str(&board.move_number().to_string());

    result
}

fn hand_to_sfen(board: &Board) -> String {
    let mut out = String::new();
    for side in Side::ALL {
        for pt in HAND_ORDER {
            let count = board.hand(side).count(pt);
            if count == 0 {
                continue;
            }
            if count > 1 {
                out.push_str(&count.to_string());
            }
            let letter = pt.to_sfen_char();
            out.push(match side {
                Side::Sente => letter,
                Side::Gote => letter.to_ascii_lowercase(),
            });
        }
    }
    out
}
