//! Session configuration.
//!
//! A session is configured by:
//! - `BoardSize`: side length of the square board
//! - `GameMode`: ratio of snakes to ladders used by the generator
//! - an optional seed for reproducible boards and dice
//!
//! `SessionConfig` deserializes from JSON with every field optional:
//!
//! ```
//! use snakes_ladders::core::{BoardSize, GameMode, SessionConfig};
//!
//! let config = SessionConfig::from_json(r#"{ "mode": "speed", "seed": 7 }"#).unwrap();
//! assert_eq!(config.mode, GameMode::Speed);
//! assert_eq!(config.board_size, BoardSize::CLASSIC);
//! assert_eq!(config.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};

use super::grid::BoardSize;
use crate::error::ValidationError;

/// Named snake/ladder ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    /// More ladders.
    Speed,
    /// More snakes.
    Challenge,
}

impl GameMode {
    /// How many of each element the generator requests.
    #[must_use]
    pub const fn element_counts(self) -> ElementCounts {
        match self {
            GameMode::Classic => ElementCounts { snakes: 8, ladders: 8 },
            GameMode::Speed => ElementCounts { snakes: 5, ladders: 12 },
            GameMode::Challenge => ElementCounts { snakes: 12, ladders: 5 },
        }
    }

    /// Lowercase name, as stored in game records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Speed => "speed",
            GameMode::Challenge => "challenge",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested element counts for a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementCounts {
    pub snakes: usize,
    pub ladders: usize,
}

impl ElementCounts {
    #[must_use]
    pub const fn total(self) -> usize {
        self.snakes + self.ladders
    }
}

/// Everything needed to create a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_size: BoardSize,
    pub mode: GameMode,
    /// Seed for board generation and dice. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create a configuration without a seed.
    #[must_use]
    pub fn new(board_size: BoardSize, mode: GameMode) -> Self {
        Self {
            board_size,
            mode,
            seed: None,
        }
    }

    /// Fix the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::Config(e.to_string()))
    }
}
