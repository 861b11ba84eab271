//! Game rules: movement resolution and the turn engine.
//!
//! - `resolve` / `MovementResolver`: one roll from one position
//! - `TurnEngine`: roster, turn order and win state for a `GameSession`
//!
//! Nothing here performs I/O. Persistence happens after each transition in
//! [`crate::persistence`].

pub mod movement;
pub mod session;
pub mod turn;

pub use movement::{check_roll, resolve, Move, MovementResolver, Outcome};
pub use session::{GameSession, SessionStatus, TurnResult};
pub use turn::TurnEngine;
