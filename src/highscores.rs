//! Local leaderboard of finished sessions
//!
//! Persisted to LocalStorage, keeps the top 10 results.

use serde::{Deserialize, Serialize};

use crate::sim::{Outcome, SessionResult};

/// Maximum number of results to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub outcome: Outcome,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard sorted by score, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "apple_catch_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished session.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    /// Ties rank below earlier entries.
    pub fn record(&mut self, result: &SessionResult, timestamp: f64) -> Option<usize> {
        if !self.qualifies(result.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: result.score,
            outcome: result.outcome,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| result.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Number of recorded wins
    pub fn wins(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Win)
            .count()
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding corrupt high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32) -> SessionResult {
        SessionResult {
            score,
            outcome: Outcome::from_score(score),
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&result(0), 1.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_best_first() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&result(3), 1.0), Some(1));
        assert_eq!(scores.record(&result(10), 2.0), Some(1));
        assert_eq!(scores.record(&result(5), 3.0), Some(2));
        assert_eq!(scores.record(&result(5), 4.0), Some(3));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![10, 5, 5, 3]);
        assert_eq!(scores.entries[1].timestamp, 3.0);
        assert_eq!(scores.best(), Some(10));
        assert_eq!(scores.wins(), 1);
    }

    #[test]
    fn test_capacity() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.record(&result(s), s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(1));
        assert_eq!(scores.record(&result(1), 99.0), None);
        assert_eq!(scores.record(&result(4), 100.0), Some(MAX_HIGH_SCORES - 2));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(2));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut scores = HighScores::new();
        scores.record(&result(10), 5.0);
        let json = serde_json::to_string(&scores).unwrap();
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries.len(), 1);
        assert_eq!(back.entries[0].outcome, Outcome::Win);
    }
}
