//! Persistence boundary.
//!
//! The engine never performs I/O. After each transition the caller hands the
//! engine to a [`SessionRecorder`], which writes the matching records through
//! a [`GameStore`]. A failed save does not roll back the move.
//!
//! - `records`: game, player and board element rows
//! - `store`: the `GameStore` trait and `MemoryStore`
//! - `recorder`: the `SessionRecorder` adapter
//! - `snapshot`: whole-session binary snapshots

pub mod records;
pub mod recorder;
pub mod snapshot;
pub mod store;

pub use records::{ElementRecord, GameId, GameRecord, PlayerRecord, RecordId};
pub use recorder::SessionRecorder;
pub use store::{GameStore, MemoryStore};
