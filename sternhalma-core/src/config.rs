//! Engine configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Search depth used when nothing else is configured
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies for automated players
    pub difficulty: u32,
    /// Seats (indices into the setup order) played by humans
    pub human_seats: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            human_seats: vec![0],
        }
    }
}

impl EngineConfig {
    /// Every seat automated
    pub fn all_automated() -> Self {
        Self {
            human_seats: Vec::new(),
            ..Default::default()
        }
    }

    /// Set search depth
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set human seats
    pub fn with_human_seats(mut self, seats: Vec<usize>) -> Self {
        self.human_seats = seats;
        self
    }

    pub fn is_human(&self, seat: usize) -> bool {
        self.human_seats.contains(&seat)
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.difficulty, 2);
        assert!(config.is_human(0));
        assert!(!config.is_human(1));
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::all_automated().with_difficulty(3);
        assert_eq!(config.difficulty, 3);
        assert!(config.human_seats.is_empty());
        let config = config.with_human_seats(vec![1, 2]);
        assert!(config.is_human(2));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"difficulty": 4}"#).unwrap();
        assert_eq!(config.difficulty, 4);
        assert_eq!(config.human_seats, vec![0]);
    }
}
