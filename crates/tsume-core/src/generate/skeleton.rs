//! Mate skeletons (詰みの骨格)
//!
//! Minimal positions with Sente to move that are mate-in-1. The reverse
//! generator transforms and decorates them.

use crate::shogi::{Board, SfenError};

/// A named skeleton
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skeleton {
    pub name: &'static str,
    pub sfen: &'static str,
    /// Number of mating moves in the bare skeleton
    pub mate_count: usize,
}

impl Skeleton {
    pub fn board(&self) -> Result<Board, SfenError> {
        Board::from_sfen(self.sfen)
    }
}

pub const CATALOG: [Skeleton; 6] = [
    // 頭金
    Skeleton {
        name: "head gold drop",
        sfen: "4k4/9/4P4/9/9/9/9/9/4K4 b G 1",
        mate_count: 1,
    },
    Skeleton {
        name: "rook file mate",
        sfen: "7lk/7p1/9/9/R8/9/9/9/4K4 b - 1",
        mate_count: 1,
    },
    Skeleton {
        name: "rook rank drop",
        sfen: "5s2k/7pp/9/9/9/9/9/9/4K4 b R 1",
        mate_count: 1,
    },
    Skeleton {
        name: "corner golds",
        sfen: "8k/9/7GG/9/9/9/9/9/K8 b - 1",
        mate_count: 4,
    },
    Skeleton {
        name: "knight drop",
        sfen: "7gk/7np/9/9/9/9/9/9/4K4 b N 1",
        mate_count: 1,
    },
    // と金
    Skeleton {
        name: "tokin promotion",
        sfen: "8k/9/7SP/9/9/9/9/9/4K4 b - 1",
        mate_count: 2,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::is_sound_puzzle;
    use crate::mate::solver::verify;

    #[test]
    fn test_catalog_is_verified() {
        for skeleton in CATALOG {
            let board = skeleton.board().unwrap();
            assert!(is_sound_puzzle(&board), "{}", skeleton.name);
            let result = verify(&board);
            assert!(result.is_mate, "{}", skeleton.name);
            assert_eq!(result.mate_count, skeleton.mate_count, "{}", skeleton.name);
        }
    }

    #[test]
    fn test_catalog_solutions() {
        let solutions: Vec<Vec<String>> = CATALOG
            .iter()
            .map(|s| {
                verify(&s.board().unwrap())
                    .mate_moves
                    .iter()
                    .map(|m| m.to_string())
                    .collect()
            })
            .collect();
        assert_eq!(solutions[0], vec!["G*5b"]);
        assert_eq!(solutions[1], vec!["9e1e"]);
        assert_eq!(solutions[2], vec!["R*3a"]);
        assert_eq!(solutions[4], vec!["N*2c"]);
        assert_eq!(solutions[5], vec!["2c1b+", "1c1b+"]);
    }
}
