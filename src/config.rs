//! Difficulty configuration surface
//!
//! Maps each difficulty level to a pair count and a layout hint. The engine
//! only consumes the pair count; the column hint is passed through for a
//! presentation layer to lay out the grid. The table is read-only at
//! runtime and can be replaced wholesale from JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ColorSpeakError, Result};

/// Difficulty level selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Few pairs, small board
    Easy,
    /// Half the palette
    Medium,
    /// The full palette
    Hard,
}

impl Difficulty {
    /// All difficulty levels in ascending order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = ColorSpeakError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ColorSpeakError::ConfigError(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

/// Settings for one difficulty level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Human-readable label
    pub label: String,
    /// Number of color pairs dealt (board holds 2x this many tiles)
    pub pairs: usize,
    /// Grid column hint for the presentation layer
    pub columns: u32,
}

impl DifficultyConfig {
    fn new(label: &str, pairs: usize, columns: u32) -> Self {
        DifficultyConfig {
            label: label.to_string(),
            pairs,
            columns,
        }
    }
}

/// The full difficulty table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySet {
    /// Easy level settings
    pub easy: DifficultyConfig,
    /// Medium level settings
    pub medium: DifficultyConfig,
    /// Hard level settings
    pub hard: DifficultyConfig,
}

impl DifficultySet {
    /// Look up the settings for a level
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Largest pair count across all levels
    pub fn max_pairs(&self) -> usize {
        self.easy.pairs.max(self.medium.pairs).max(self.hard.pairs)
    }

    /// Parse a difficulty table from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ColorSpeakError::ParseError(e.to_string()))
    }
}

impl Default for DifficultySet {
    fn default() -> Self {
        DifficultySet {
            easy: DifficultyConfig::new("Easy", 3, 3),
            medium: DifficultyConfig::new("Medium", 6, 4),
            hard: DifficultyConfig::new("Hard", 12, 6),
        }
    }
}
