//! Random generation: seeded random positions filtered by the solver

use super::{GenerateError, MaterialSupply, is_sound_puzzle, rng_for};
use crate::mate::solver::verify;
use crate::quality::QualityCriteria;
use crate::shogi::{Board, Piece, PieceType, Side, Square};
use log::{debug, trace, warn};
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

// 持ち駒にする確率
const HAND_CHANCE: f64 = 0.3;
// 攻め方の駒にする確率
const ATTACKER_CHANCE: f64 = 0.6;
// 玉の近くに置く確率
const NEAR_KING_CHANCE: f64 = 0.6;
const PROMOTED_CHANCE: f64 = 0.15;
const PLACEMENT_TRIES: usize = 32;

/// Random generator settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomConfig {
    pub n_problems: usize,
    /// Upper bound on material (kings and hand pieces included)
    pub max_pieces: usize,
    pub require_unique: bool,
    pub seed: u64,
    /// Attempt budget per requested puzzle
    pub max_attempts: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        RandomConfig {
            n_problems: 1,
            max_pieces: 10,
            require_unique: true,
            seed: 0,
            max_attempts: 10000,
        }
    }
}

impl RandomConfig {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.n_problems == 0 {
            return Err(GenerateError::InvalidConfig("n_problems must be at least 1".into()));
        }
        if self.max_pieces < 2 {
            return Err(GenerateError::InvalidConfig(format!(
                "max_pieces must leave room for both kings, got {}",
                self.max_pieces
            )));
        }
        if self.max_attempts == 0 {
            return Err(GenerateError::InvalidConfig("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

pub struct RandomGenerator {
    config: RandomConfig,
    criteria: QualityCriteria,
}

impl RandomGenerator {
    pub fn new(config: RandomConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let criteria = QualityCriteria {
            require_unique: config.require_unique,
            max_pieces: config.max_pieces,
            ..QualityCriteria::default()
        };
        Ok(RandomGenerator { config, criteria })
    }

    pub fn config(&self) -> &RandomConfig {
        &self.config
    }

    /// Lazy puzzle sequence. Yields `Exhausted` once and stops when a puzzle
    /// slot runs out of attempts.
    pub fn puzzles(&self) -> RandomPuzzles<'_> {
        self.stream(false)
    }

    /// Same sequence as [`RandomGenerator::puzzles`], with each slot's
    /// attempts evaluated on the rayon pool. The lowest successful attempt
    /// index wins, so puzzles found before an exhaustion are kept as well.
    pub fn par_puzzles(&self) -> RandomPuzzles<'_> {
        self.stream(true)
    }

    fn stream(&self, parallel: bool) -> RandomPuzzles<'_> {
        RandomPuzzles {
            generator: self,
            parallel,
            next_attempt: 0,
            found: 0,
            done: false,
        }
    }

    /// All requested puzzles, or the first failure
    pub fn generate(&self) -> Result<Vec<Board>, GenerateError> {
        self.puzzles().collect()
    }

    /// [`RandomGenerator::generate`] on the rayon pool
    pub fn generate_parallel(&self) -> Result<Vec<Board>, GenerateError> {
        self.par_puzzles().collect()
    }

    /// First accepted attempt in `start..start + max_attempts`
    fn find_sequential(&self, start: u64) -> Option<(u64, Board)> {
        (start..start + self.config.max_attempts as u64)
            .find_map(|index| self.attempt(index).map(|board| (index, board)))
    }

    /// As [`Self::find_sequential`], in batches of `threads * 4` attempts
    fn find_parallel(&self, start: u64) -> Option<(u64, Board)> {
        let batch = (rayon::current_num_threads() * 4).max(1);
        let mut used = 0usize;
        while used < self.config.max_attempts {
            let len = batch.min(self.config.max_attempts - used);
            let from = start + used as u64;
            let hit = (from..from + len as u64)
                .into_par_iter()
                .find_map_first(|index| self.attempt(index).map(|board| (index, board)));
            if hit.is_some() {
                return hit;
            }
            used += len;
        }
        None
    }

    /// One attempt with its own RNG; None when rejected
    fn attempt(&self, index: u64) -> Option<Board> {
        let mut rng = rng_for(self.config.seed, index);
        let board = random_position(&mut rng, self.config.max_pieces);
        if !is_sound_puzzle(&board) {
            trace!("attempt {index}: unsound position");
            return None;
        }
        let result = verify(&board);
        if self.criteria.accepts(&result, board.material_count()) {
            Some(board)
        } else {
            trace!("attempt {index}: {} mate moves", result.mate_count);
            None
        }
    }

    fn exhausted(&self, found: usize) -> GenerateError {
        warn!(
            "random generation exhausted after {} attempts ({found}/{} found)",
            self.config.max_attempts, self.config.n_problems
        );
        GenerateError::Exhausted {
            attempts: self.config.max_attempts,
            found,
            requested: self.config.n_problems,
        }
    }
}

/// Both kings in their home camps plus up to `max_pieces - 2` extra pieces,
/// biased toward the defending king. Some extras go to the attacker's hand.
fn random_position(rng: &mut Xoshiro256PlusPlus, max_pieces: usize) -> Board {
    let mut board = Board::empty();
    let attacker = if rng.random_bool(0.5) {
        Side::Sente
    } else {
        Side::Gote
    };
    board.set_side_to_move(attacker);

    let sente_king = Square::new(rng.random_range(1..=9), rng.random_range(7..=9));
    let gote_king = Square::new(rng.random_range(1..=9), rng.random_range(1..=3));
    let (Some(sente_king), Some(gote_king)) = (sente_king, gote_king) else {
        return board;
    };
    board.place(sente_king, Piece::new(PieceType::King, Side::Sente));
    board.place(gote_king, Piece::new(PieceType::King, Side::Gote));
    let defender_king = match attacker {
        Side::Sente => gote_king,
        Side::Gote => sente_king,
    };

    let Some(mut supply) = MaterialSupply::after(&board) else {
        return board;
    };

    let extras = rng.random_range(0..=max_pieces.saturating_sub(2));
    for _ in 0..extras {
        let kinds: Vec<PieceType> = supply.available().collect();
        if kinds.is_empty() {
            break;
        }
        let piece_type = kinds[rng.random_range(0..kinds.len())];

        if rng.random_bool(HAND_CHANCE) {
            if board.add_to_hand(attacker, piece_type, 1).is_ok() {
                supply.take(piece_type);
            }
            continue;
        }

        let side = if rng.random_bool(ATTACKER_CHANCE) {
            attacker
        } else {
            attacker.opposite()
        };
        let promoted = piece_type.can_promote() && rng.random_bool(PROMOTED_CHANCE);
        let Some(piece) = Piece::with_promotion(piece_type, side, promoted) else {
            continue;
        };

        for _ in 0..PLACEMENT_TRIES {
            let sq = if rng.random_bool(NEAR_KING_CHANCE) {
                defender_king.offset(rng.random_range(-2..=2), rng.random_range(-2..=2))
            } else {
                Square::from_index(rng.random_range(0..Square::NUM))
            };
            let Some(sq) = sq else {
                continue;
            };
            if can_place(&board, piece, sq) {
                board.place(sq, piece);
                supply.take(piece_type);
                break;
            }
        }
    }
    board
}

fn can_place(board: &Board, piece: Piece, sq: Square) -> bool {
    if board.piece_on(sq).is_some() || piece.is_dead_on(sq.rank()) {
        return false;
    }
    let pawn = piece.piece_type() == PieceType::Pawn && !piece.is_promoted();
    !(pawn && board.has_unpromoted_pawn_on_file(piece.side(), sq.file()))
}

/// Iterator over randomly generated puzzles
pub struct RandomPuzzles<'a> {
    generator: &'a RandomGenerator,
    parallel: bool,
    next_attempt: u64,
    found: usize,
    done: bool,
}

impl Iterator for RandomPuzzles<'_> {
    type Item = Result<Board, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let generator = self.generator;
        if self.done || self.found >= generator.config.n_problems {
            return None;
        }

        let hit = if self.parallel {
            generator.find_parallel(self.next_attempt)
        } else {
            generator.find_sequential(self.next_attempt)
        };
        match hit {
            Some((index, board)) => {
                debug!("random puzzle {} found at attempt {index}", self.found);
                self.found += 1;
                self.next_attempt = index + 1;
                Some(Ok(board))
            }
            None => {
                self.done = true;
                Some(Err(generator.exhausted(self.found)))
            }
        }
    }
}

/// Generate puzzles with `config`
pub fn generate_random(config: &RandomConfig) -> Result<Vec<Board>, GenerateError> {
    RandomGenerator::new(config.clone())?.generate()
}
