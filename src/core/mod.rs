//! Core engine types: cells and board geometry, players, configuration, RNG.
//!
//! This module contains the building blocks shared by board generation,
//! movement and the turn engine.

pub mod grid;
pub mod player;
pub mod rng;
pub mod config;

pub use grid::{BoardSize, Cell, GridPos, START_CELL};
pub use player::{Player, PlayerColor, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedSource, DIE_FACES};
pub use config::{ElementCounts, GameMode, SessionConfig};
