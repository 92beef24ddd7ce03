//! Reverse generation: start from a known mate and dress it up

use super::skeleton::CATALOG;
use super::{GenerateError, MaterialSupply, is_sound_puzzle, rng_for};
use crate::mate::solver::verify;
use crate::shogi::{Board, Piece, PieceType, Side, Square};
use log::{debug, trace};
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Reverse generator settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReverseConfig {
    pub n_problems: usize,
    pub seed: u64,
    /// Upper bound on filler pieces added to a skeleton
    pub max_filler: usize,
    /// Filler layouts tried before falling back to the bare skeleton
    pub filler_attempts: usize,
}

impl Default for ReverseConfig {
    fn default() -> Self {
        ReverseConfig {
            n_problems: 1,
            seed: 0,
            max_filler: 4,
            filler_attempts: 16,
        }
    }
}

/// Board symmetry applied to a skeleton
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    Mirror,
    Rotate,
    RotateMirror,
}

impl Symmetry {
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Identity,
        Symmetry::Mirror,
        Symmetry::Rotate,
        Symmetry::RotateMirror,
    ];

    pub fn apply(self, board: &Board) -> Board {
        match self {
            Symmetry::Identity => board.clone(),
            Symmetry::Mirror => board.mirrored(),
            Symmetry::Rotate => board.rotated(),
            Symmetry::RotateMirror => board.rotated().mirrored(),
        }
    }
}

pub struct ReverseGenerator {
    config: ReverseConfig,
    skeletons: Vec<(&'static str, Board)>,
}

impl ReverseGenerator {
    pub fn new(config: ReverseConfig) -> Result<Self, GenerateError> {
        if config.n_problems == 0 {
            return Err(GenerateError::InvalidConfig("n_problems must be at least 1".into()));
        }
        let skeletons = CATALOG
            .iter()
            .map(|s| -> Result<_, GenerateError> { Ok((s.name, s.board()?)) })
            .collect::<Result<Vec<_>, GenerateError>>()?;
        Ok(ReverseGenerator { config, skeletons })
    }

    pub fn config(&self) -> &ReverseConfig {
        &self.config
    }

    /// Lazy puzzle sequence; a fresh call restarts it
    pub fn puzzles(&self) -> ReversePuzzles<'_> {
        ReversePuzzles {
            generator: self,
            index: 0,
        }
    }

    /// All requested puzzles, or the first failure
    pub fn generate(&self) -> Result<Vec<Board>, GenerateError> {
        self.puzzles().collect()
    }

    fn build(&self, index: usize) -> Result<Board, GenerateError> {
        let mut rng = rng_for(self.config.seed, index as u64);
        let (name, skeleton) = &self.skeletons[rng.random_range(0..self.skeletons.len())];
        let symmetry = Symmetry::ALL[rng.random_range(0..Symmetry::ALL.len())];
        let base = symmetry.apply(skeleton);
        let expected = verify(&base).mate_moves;

        for attempt in 0..self.config.filler_attempts {
            let candidate = self.add_filler(&base, &mut rng);
            if is_sound_puzzle(&candidate) && verify(&candidate).mate_moves == expected {
                debug!(
                    "reverse puzzle {index}: {name} ({symmetry:?}) with {} filler after {} tries",
                    candidate.piece_count() - base.piece_count(),
                    attempt + 1
                );
                return Ok(candidate);
            }
            trace!("reverse puzzle {index}: filler layout {attempt} rejected");
        }

        if !expected.is_empty() && is_sound_puzzle(&base) {
            debug!("reverse puzzle {index}: bare {name} ({symmetry:?})");
            return Ok(base);
        }
        Err(GenerateError::Exhausted {
            attempts: self.config.filler_attempts + 1,
            found: index,
            requested: self.config.n_problems,
        })
    }

    /// Scatter filler pieces away from both kings
    fn add_filler(&self, base: &Board, rng: &mut Xoshiro256PlusPlus) -> Board {
        let mut board = base.clone();
        let (Some(attacker_king), Some(defender_king)) = (
            board.king_square(base.side_to_move()),
            board.king_square(base.side_to_move().opposite()),
        ) else {
            return board;
        };
        let Some(mut supply) = MaterialSupply::after(&board) else {
            return board;
        };

        let count = rng.random_range(0..=self.config.max_filler);
        for _ in 0..count {
            let kinds: Vec<PieceType> = supply.available().collect();
            if kinds.is_empty() {
                break;
            }
            let piece_type = kinds[rng.random_range(0..kinds.len())];
            let side = if rng.random_bool(0.5) {
                Side::Sente
            } else {
                Side::Gote
            };
            let promoted = piece_type.can_promote() && rng.random_bool(0.2);
            let Some(piece) = Piece::with_promotion(piece_type, side, promoted) else {
                continue;
            };

            for _ in 0..32 {
                let Some(sq) = Square::from_index(rng.random_range(0..Square::NUM)) else {
                    continue;
                };
                if filler_fits(&board, piece, sq, attacker_king, defender_king) {
                    board.place(sq, piece);
                    supply.take(piece_type);
                    break;
                }
            }
        }
        board
    }
}

fn filler_fits(
    board: &Board,
    piece: Piece,
    sq: Square,
    attacker_king: Square,
    defender_king: Square,
) -> bool {
    if board.piece_on(sq).is_some() || piece.is_dead_on(sq.rank()) {
        return false;
    }
    if sq.distance(defender_king) < 3 || sq.distance(attacker_king) < 2 {
        return false;
    }
    let pawn = piece.piece_type() == PieceType::Pawn && !piece.is_promoted();
    !(pawn && board.has_unpromoted_pawn_on_file(piece.side(), sq.file()))
}

/// Iterator over reverse-generated puzzles
pub struct ReversePuzzles<'a> {
    generator: &'a ReverseGenerator,
    index: usize,
}

impl Iterator for ReversePuzzles<'_> {
    type Item = Result<Board, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.generator.config.n_problems {
            return None;
        }
        let result = self.generator.build(self.index);
        self.index += 1;
        if result.is_err() {
            // one failure ends the sequence
            self.index = self.generator.config.n_problems;
        }
        Some(result)
    }
}

/// `n` reverse-generated puzzles from `seed` with default filler settings
pub fn generate_reverse(n: usize, seed: u64) -> Result<Vec<Board>, GenerateError> {
    let config = ReverseConfig {
        n_problems: n,
        seed,
        ..ReverseConfig::default()
    };
    ReverseGenerator::new(config)?.generate()
}
