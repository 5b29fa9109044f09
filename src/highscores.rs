//! Ranked high-score persistence.
//!
//! The core only ever appends a final score and reads back a descending list;
//! everything else (display, menus) belongs to collaborators. Storage I/O
//! failures are never fatal to gameplay: a missing or unreadable store simply
//! behaves as an empty one.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Maximum number of scores kept in the ranked list.
pub const MAX_SCORES: usize = 10;

/// Where finished sessions report their score.
pub trait ScoreStore: Send + Sync {
    /// Appends `score` to the ranked list.
    fn append(&mut self, score: u32);

    /// Prior scores, sorted descending.
    fn scores(&self) -> &[u32];
}

fn insert_ranked(scores: &mut Vec<u32>, score: u32) {
    let pos = scores.iter().position(|&s| score > s).unwrap_or(scores.len());
    scores.insert(pos, score);
    scores.truncate(MAX_SCORES);
}

/// In-memory store; the default when no persistence is wired up.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: Vec<u32>,
}

impl ScoreStore for MemoryScoreStore {
    fn append(&mut self, score: u32) {
        insert_ranked(&mut self.scores, score);
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct ScoreFile {
    scores: Vec<u32>,
}

/// JSON-file-backed store.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    scores: Vec<u32>,
}

impl JsonScoreStore {
    /// Loads the ranked list from `path`. A missing, unreadable, or corrupt
    /// file yields an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<ScoreFile>(&contents) {
                Ok(file) => {
                    let mut scores = file.scores;
                    scores.sort_unstable_by(|a, b| b.cmp(a));
                    scores.truncate(MAX_SCORES);
                    debug!(count = scores.len(), path = %path.display(), "Loaded high scores");
                    scores
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "High score file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable high score file, starting empty");
                Vec::new()
            }
        };
        Self { path, scores }
    }

    fn save(&self) {
        let file = ScoreFile {
            scores: self.scores.clone(),
        };
        match serde_json::to_string(&file) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "Failed to save high scores");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize high scores"),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn append(&mut self, score: u32) {
        insert_ranked(&mut self.scores, score);
        self.save();
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_sorts_descending() {
        let mut store = MemoryScoreStore::default();
        store.append(100);
        store.append(300);
        store.append(200);
        assert_eq!(store.scores(), &[300, 200, 100]);
    }

    #[test]
    fn test_memory_store_truncates() {
        let mut store = MemoryScoreStore::default();
        for i in 0..(MAX_SCORES as u32 + 5) {
            store.append(i * 10);
        }
        assert_eq!(store.scores().len(), MAX_SCORES);
        assert_eq!(store.scores()[0], (MAX_SCORES as u32 + 4) * 10);
    }

    #[test]
    fn test_duplicate_scores_kept() {
        let mut store = MemoryScoreStore::default();
        store.append(50);
        store.append(50);
        assert_eq!(store.scores(), &[50, 50]);
    }
}
