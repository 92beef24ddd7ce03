use tsume_core::quality::{count_pieces, evaluate};
use tsume_core::{Board, VerificationResult, score, verify};

fn base() -> VerificationResult {
    VerificationResult {
        is_mate: true,
        is_unique: true,
        mate_moves: Vec::new(),
        mate_count: 1,
        total_legal_moves: 20,
        checking_moves: 5,
        average_responses: 2.5,
    }
}

fn score_of(result: &VerificationResult, pieces: usize) -> f64 {
    score(result, pieces).difficulty_score
}

#[test]
fn increases_with_legal_moves() {
    let low = base();
    let high = VerificationResult { total_legal_moves: 40, ..base() };
    assert!(score_of(&high, 6) > score_of(&low, 6));
}

#[test]
fn increases_with_checking_moves() {
    let low = base();
    let high = VerificationResult { checking_moves: 9, ..base() };
    assert!(score_of(&high, 6) > score_of(&low, 6));
}

#[test]
fn increases_with_average_responses() {
    let low = VerificationResult { average_responses: 0.0, ..base() };
    let high = base();
    assert!(score_of(&high, 6) > score_of(&low, 6));
}

#[test]
fn increases_with_pieces() {
    assert!(score_of(&base(), 12) > score_of(&base(), 6));
}

#[test]
fn decreases_with_mate_count() {
    let unique = base();
    let many = VerificationResult {
        mate_count: 4,
        is_unique: false,
        ..base()
    };
    assert!(score_of(&many, 6) < score_of(&unique, 6));
}

#[test]
fn echoes_inputs() {
    let board = Board::from_sfen("8k/9/7GG/9/9/9/9/9/K8 b - 1").unwrap();
    let result = verify(&board);
    let difficulty = score(&result, count_pieces(&board));
    assert_eq!(difficulty.total_pieces, 4);
    assert_eq!(difficulty.legal_moves, result.total_legal_moves);
    assert_eq!(difficulty.checking_moves, result.checking_moves);
    assert_eq!(difficulty.mate_moves, 4);
    assert_eq!(difficulty.average_responses, result.average_responses);
    assert_eq!(evaluate(&board), difficulty);
}
