use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Number of scores kept on the board
const CAPACITY: usize = 5;

/// The persistent top-5 high-score list, descending.
///
/// Stored on disk as a plain JSON array of integers. The in-memory list is
/// authoritative for the session: a missing or corrupt file loads as empty,
/// and a failed write leaves the list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<u32>,
    path: PathBuf,
}

impl HighScores {
    /// Load the score board, treating any read or parse failure as empty
    pub fn load(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(mut entries) => {
                    entries.sort_unstable_by(|a, b| b.cmp(a));
                    entries.truncate(CAPACITY);
                    entries
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "corrupt high-score file, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            entries,
            path: path.to_path_buf(),
        }
    }

    /// In-memory board for tests and ephemeral sessions
    pub fn empty(path: &Path) -> Self {
        Self {
            entries: Vec::new(),
            path: path.to_path_buf(),
        }
    }

    pub fn top(&self) -> &[u32] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().copied()
    }

    /// Insert a finished round's score, keeping the list descending and
    /// capped. Returns true if the score made the board.
    pub fn record(&mut self, score: u32) -> bool {
        self.entries.push(score);
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        self.entries.truncate(CAPACITY);
        self.entries.contains(&score)
    }

    /// Write the board to disk. Callers treat failure as non-fatal.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {parent:?}"))?;
            }
        }
        let raw = serde_json::to_string(&self.entries).context("Failed to serialize scores")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snake_arena_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn test_record_sorts_and_truncates() {
        let mut scores = HighScores::empty(Path::new("unused.json"));

        for s in [3, 10, 7, 1, 9, 4] {
            scores.record(s);
        }
        assert_eq!(scores.top(), &[10, 9, 7, 4, 3]);
        assert_eq!(scores.best(), Some(10));

        assert!(!scores.record(2));
        assert!(scores.record(8));
        assert_eq!(scores.top(), &[10, 9, 8, 7, 4]);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round_trip");
        let mut scores = HighScores::empty(&path);
        scores.record(12);
        scores.record(5);
        scores.save().unwrap();

        let reloaded = HighScores::load(&path);
        assert_eq!(reloaded.top(), &[12, 5]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let scores = HighScores::load(Path::new("does/not/exist.json"));
        assert!(scores.top().is_empty());
        assert_eq!(scores.best(), None);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json at all").unwrap();

        let scores = HighScores::load(&path);
        assert!(scores.top().is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_oversized_file_is_trimmed_on_load() {
        let path = temp_path("oversized");
        std::fs::write(&path, "[1,2,3,4,5,6,7]").unwrap();

        let scores = HighScores::load(&path);
        assert_eq!(scores.top(), &[7, 6, 5, 4, 3]);

        std::fs::remove_file(&path).ok();
    }
}
