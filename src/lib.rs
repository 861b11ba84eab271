//! # snakes-ladders
//!
//! A self-contained Snake-and-Ladder rules engine usable by any front end.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: The engine performs no I/O. Every operation
//!    either fully applies or leaves the session untouched.
//!
//! 2. **Injectable Randomness**: Board generation and dice draw from a
//!    `RandomSource`, so seeded or scripted sources make games reproducible.
//!
//! 3. **Persistence at the Boundary**: A `SessionRecorder` writes records
//!    after each transition; a failed save never undoes a move.
//!
//! ## Modules
//!
//! - `core`: Cells and board geometry, players, configuration, RNG
//! - `board`: Snakes, ladders and procedural generation
//! - `rules`: Movement resolution and the turn engine
//! - `persistence`: Record shapes, the store trait and the recorder
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use snakes_ladders::{SessionConfig, SessionStatus, TurnEngine, GameRng};
//!
//! let config = SessionConfig::default().with_seed(42);
//! let mut engine = TurnEngine::new(&config);
//! engine.add_player("Ada").unwrap();
//! engine.add_player("Bo").unwrap();
//! engine.start().unwrap();
//!
//! let mut dice = GameRng::new(42).for_context("dice");
//! while engine.session().status() != SessionStatus::Completed {
//!     engine.roll_and_take_turn(&mut dice).unwrap();
//! }
//! assert!(engine.session().winner().is_some());
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod persistence;
pub mod error;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BoardSize, Cell, GridPos, GameMode, ElementCounts, SessionConfig,
    Player, PlayerColor, PlayerId, MAX_PLAYERS, MIN_PLAYERS,
    GameRng, GameRngState, RandomSource, ScriptedSource,
};

pub use crate::board::{BoardElement, BoardElementGenerator, BoardElements, ElementId, ElementKind};

pub use crate::rules::{
    resolve, Move, MovementResolver, Outcome,
    GameSession, SessionStatus, TurnEngine, TurnResult,
};

pub use crate::persistence::{GameStore, MemoryStore, SessionRecorder};

pub use crate::error::{EngineError, ErrorKind, RecorderError, StoreError, ValidationError};
