use tsume_core::generate::{ReversePuzzles, is_sound_puzzle};
use tsume_core::{
    Board, GenerateError, PieceType, RandomConfig, RandomGenerator, ReverseConfig, ReverseGenerator,
    Side, generate_random, generate_reverse, verify,
};

fn small_random_config(seed: u64) -> RandomConfig {
    RandomConfig {
        n_problems: 2,
        max_pieces: 8,
        require_unique: false,
        seed,
        max_attempts: 300,
    }
}

fn has_nifu(board: &Board) -> bool {
    Side::ALL.iter().any(|&side| {
        (1..=9).any(|file| {
            board
                .pieces(side)
                .filter(|(sq, p)| {
                    sq.file() == file && p.piece_type() == PieceType::Pawn && !p.is_promoted()
                })
                .count()
                > 1
        })
    })
}

#[test]
fn reverse_is_deterministic() {
    let a = generate_reverse(12, 77).unwrap();
    let b = generate_reverse(12, 77).unwrap();
    assert_eq!(a.len(), 12);
    assert_eq!(a, b);
}

#[test]
fn reverse_seeds_differ() {
    let a = generate_reverse(12, 1).unwrap();
    let b = generate_reverse(12, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn reverse_puzzles_are_valid_mates() {
    for board in generate_reverse(16, 123).unwrap() {
        assert!(is_sound_puzzle(&board), "{}", board.to_sfen());
        assert!(!has_nifu(&board));
        assert!(verify(&board).is_mate, "{}", board.to_sfen());
    }
}

#[test]
fn reverse_iterator_restarts() {
    let generator = ReverseGenerator::new(ReverseConfig {
        n_problems: 5,
        seed: 9,
        ..ReverseConfig::default()
    })
    .unwrap();
    let first: ReversePuzzles<'_> = generator.puzzles();
    let first: Vec<_> = first.collect();
    let second: Vec<_> = generator.puzzles().collect();
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    // a prefix of a longer run is the same sequence
    let longer = generate_reverse(7, 9).unwrap();
    let first: Vec<Board> = first.into_iter().map(Result::unwrap).collect();
    assert_eq!(&longer[..5], &first[..]);
}

#[test]
fn random_is_deterministic() {
    let config = small_random_config(42);
    assert_eq!(generate_random(&config), generate_random(&config));
}

#[test]
fn random_parallel_matches_sequential() {
    for seed in [3, 17] {
        let generator = RandomGenerator::new(small_random_config(seed)).unwrap();
        assert_eq!(generator.generate_parallel(), generator.generate());
    }
}

#[test]
fn random_puzzles_satisfy_acceptance() {
    let config = RandomConfig {
        require_unique: true,
        ..small_random_config(5)
    };
    let generator = RandomGenerator::new(config).unwrap();
    for result in generator.puzzles() {
        let Ok(board) = result else {
            break;
        };
        assert!(is_sound_puzzle(&board));
        assert!(!has_nifu(&board));
        assert!(board.material_count() <= 8);
        let verification = verify(&board);
        assert!(verification.is_mate);
        assert!(verification.is_unique);
    }
}

#[test]
fn two_piece_limit_reports_exhaustion() {
    let config = RandomConfig {
        n_problems: 1,
        max_pieces: 2,
        require_unique: true,
        seed: 1,
        max_attempts: 200,
    };
    let expected = GenerateError::Exhausted {
        attempts: 200,
        found: 0,
        requested: 1,
    };
    assert_eq!(generate_random(&config), Err(expected.clone()));
    let generator = RandomGenerator::new(config).unwrap();
    assert_eq!(generator.generate_parallel(), Err(expected));
}

#[test]
fn invalid_random_config() {
    let config = RandomConfig {
        max_pieces: 1,
        ..RandomConfig::default()
    };
    assert!(matches!(generate_random(&config), Err(GenerateError::InvalidConfig(_))));
}
