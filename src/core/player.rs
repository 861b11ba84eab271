//! Player identification, colors and per-player data.
//!
//! ## PlayerId
//!
//! Stable identifier assigned when a player joins. Unlike a roster index it
//! survives removal of other players.
//!
//! ## PlayerColor
//!
//! Fixed four-color palette. Presentation only.

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Minimum roster size for a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum roster size for a game.
pub const MAX_PLAYERS: usize = 4;

/// Player identifier, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Token color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Indigo,
    Emerald,
    Orange,
    Violet,
}

impl PlayerColor {
    /// Palette in assignment order.
    pub const PALETTE: [PlayerColor; 4] = [
        PlayerColor::Indigo,
        PlayerColor::Emerald,
        PlayerColor::Orange,
        PlayerColor::Violet,
    ];

    /// Color for the player joining a roster that currently has `roster_len` players.
    #[must_use]
    pub fn for_slot(roster_len: usize) -> Self {
        Self::PALETTE[roster_len % Self::PALETTE.len()]
    }

    /// CSS hex value.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            PlayerColor::Indigo => "#4f46e5",
            PlayerColor::Emerald => "#10b981",
            PlayerColor::Orange => "#f97316",
            PlayerColor::Violet => "#8b5cf6",
        }
    }

    /// Parse a CSS hex value from the palette.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::PALETTE
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex))
    }
}

/// A participant in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
    /// Current cell, starting at 1.
    pub position: Cell,
}

impl Player {
    /// Create a player at the start cell.
    pub fn new(id: PlayerId, display_name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            color,
            position: super::grid::START_CELL,
        }
    }
}
