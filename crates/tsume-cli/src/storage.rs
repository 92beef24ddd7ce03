//! User puzzle collection stored as `<dir>/user_puzzles.json`

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tsume_core::Board;

const PUZZLE_FILE: &str = "user_puzzles.json";

/// One saved puzzle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPuzzle {
    pub sfen: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Fields supplied when saving
#[derive(Clone, Debug, Default)]
pub struct NewPuzzle {
    pub sfen: String,
    pub name: Option<String>,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
}

pub struct PuzzleStorage {
    file: PathBuf,
}

impl PuzzleStorage {
    /// Open (and create) the storage directory
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create puzzle directory {}", dir.display()))?;
        Ok(PuzzleStorage {
            file: dir.join(PUZZLE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Validate and append a puzzle
    pub fn save(&self, new: NewPuzzle) -> Result<StoredPuzzle> {
        let board = Board::from_sfen(&new.sfen).context("invalid SFEN")?;
        let now = Local::now();
        let puzzle = StoredPuzzle {
            sfen: board.to_sfen(),
            name: new
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Puzzle {}", now.format("%Y%m%d_%H%M%S"))),
            description: new.description,
            author: new.author,
            tags: new.tags,
            created_at: now.to_rfc3339(),
        };

        let mut puzzles = self.load_all()?;
        puzzles.push(puzzle.clone());
        self.write_all(&puzzles)?;
        log::debug!("saved puzzle #{} to {}", puzzles.len() - 1, self.file.display());
        Ok(puzzle)
    }

    /// All stored puzzles; a missing file is an empty collection
    pub fn load_all(&self) -> Result<Vec<StoredPuzzle>> {
        if !self.file.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        serde_json::from_str(&text).with_context(|| format!("malformed {}", self.file.display()))
    }

    /// Puzzle at 0-based `index`
    pub fn get(&self, index: usize) -> Result<Option<StoredPuzzle>> {
        Ok(self.load_all()?.into_iter().nth(index))
    }

    /// Remove the puzzle at `index`; false when out of range
    pub fn delete(&self, index: usize) -> Result<bool> {
        let mut puzzles = self.load_all()?;
        if index >= puzzles.len() {
            return Ok(false);
        }
        puzzles.remove(index);
        self.write_all(&puzzles)?;
        Ok(true)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    /// Case-insensitive match on name, description or author, or any shared
    /// tag. No filters returns everything.
    pub fn search(&self, query: &str, tags: &[String]) -> Result<Vec<(usize, StoredPuzzle)>> {
        let query = query.to_lowercase();
        let matches = |p: &StoredPuzzle| {
            if query.is_empty() && tags.is_empty() {
                return true;
            }
            let text_hit = !query.is_empty()
                && [&p.name, &p.description, &p.author]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query));
            let tag_hit = tags.iter().any(|t| p.tags.contains(t));
            text_hit || tag_hit
        };
        Ok(self
            .load_all()?
            .into_iter()
            .enumerate()
            .filter(|(_, p)| matches(p))
            .collect())
    }

    fn write_all(&self, puzzles: &[StoredPuzzle]) -> Result<()> {
        let json = serde_json::to_string_pretty(puzzles)?;
        fs::write(&self.file, json)
            .with_context(|| format!("failed to write {}", self.file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage() -> (TempDir, PuzzleStorage) {
        let dir = TempDir::new().unwrap();
        let storage = PuzzleStorage::open(dir.path()).unwrap();
        (dir, storage)
    }

    fn new_puzzle(sfen: &str, name: &str, tags: &[&str]) -> NewPuzzle {
        NewPuzzle {
            sfen: sfen.to_string(),
            name: Some(name.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..NewPuzzle::default()
        }
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, storage) = storage();
        assert_eq!(storage.count().unwrap(), 0);
        let saved = storage
            .save(new_puzzle("4k4/9/4P4/9/9/9/9/9/4K4 b G 1", "head gold", &["drop"]))
            .unwrap();
        assert_eq!(saved.name, "head gold");
        assert!(chrono::DateTime::parse_from_rfc3339(&saved.created_at).is_ok());
        assert_eq!(storage.count().unwrap(), 1);
        assert_eq!(storage.get(0).unwrap(), Some(saved));
        assert_eq!(storage.get(1).unwrap(), None);
    }

    #[test]
    fn test_default_name() {
        let (_dir, storage) = storage();
        let saved = storage
            .save(NewPuzzle {
                sfen: "8k/9/7GG/9/9/9/9/9/K8 b - 1".to_string(),
                ..NewPuzzle::default()
            })
            .unwrap();
        assert!(saved.name.starts_with("Puzzle "));
    }

    #[test]
    fn test_invalid_sfen_is_rejected() {
        let (_dir, storage) = storage();
        assert!(storage.save(new_puzzle("not a sfen", "bad", &[])).is_err());
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_and_search() {
        let (_dir, storage) = storage();
        storage
            .save(new_puzzle("4k4/9/4P4/9/9/9/9/9/4K4 b G 1", "Head Gold", &["drop"]))
            .unwrap();
        storage
            .save(new_puzzle("8k/9/7GG/9/9/9/9/9/K8 b - 1", "corner", &["easy"]))
            .unwrap();

        let hits = storage.search("gold", &[]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 0);
        let hits = storage.search("", &["easy".to_string()]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.name, "corner");
        assert_eq!(storage.search("", &[]).unwrap().len(), 2);

        assert!(storage.delete(0).unwrap());
        assert!(!storage.delete(5).unwrap());
        assert_eq!(storage.count().unwrap(), 1);
        assert_eq!(storage.get(0).unwrap().unwrap().name, "corner");
    }
}
