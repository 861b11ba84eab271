//! Error types.
//!
//! Engine errors are local and recoverable: an operation that returns one
//! has left the session exactly as it was. Persistence errors live in a
//! separate enum because they never affect in-memory state.

use thiserror::Error;

use crate::board::ElementKind;
use crate::core::{Cell, PlayerId};
use crate::rules::SessionStatus;

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Bad input (empty name, roll outside 1-6, malformed element...).
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The roster already holds the maximum number of players.
    #[error("player roster is full ({max} players)")]
    Capacity { max: usize },

    /// Removing a player would drop the roster below the minimum.
    #[error("cannot remove player: at least {min} players are required")]
    MinimumPlayers { min: usize },

    /// The game cannot start with this few players.
    #[error("cannot start with {count} player(s): at least {min} are required")]
    InsufficientPlayers { count: usize, min: usize },

    /// The operation is not valid in the session's current state.
    #[error("`{operation}` is not allowed while the session is {status}")]
    InvalidState {
        operation: &'static str,
        status: SessionStatus,
    },
}

impl EngineError {
    /// Fieldless category of this error, for mapping to user-facing text.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::Capacity { .. } => ErrorKind::Capacity,
            EngineError::MinimumPlayers { .. } => ErrorKind::MinimumPlayers,
            EngineError::InsufficientPlayers { .. } => ErrorKind::InsufficientPlayers,
            EngineError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Error categories exposed to front ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Capacity,
    MinimumPlayers,
    InsufficientPlayers,
    InvalidState,
}

/// Detail for [`EngineError::Validation`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("game name must not be empty")]
    EmptyGameName,

    #[error("die roll {0} is outside 1..=6")]
    RollOutOfRange(u8),

    #[error("position {position} is outside 1..={final_cell}")]
    PositionOutOfRange { position: Cell, final_cell: Cell },

    #[error("board size {0} is outside 2..=255")]
    BoardSize(u16),

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("{kind} from {start} to {end} runs the wrong way")]
    ElementDirection {
        kind: ElementKind,
        start: Cell,
        end: Cell,
    },

    #[error("{kind} from {start} to {end} leaves the playable range 2..={max}")]
    ElementOutOfRange {
        kind: ElementKind,
        start: Cell,
        end: Cell,
        max: Cell,
    },

    #[error("two board elements start on cell {0}")]
    DuplicateStart(Cell),

    #[error("malformed configuration: {0}")]
    Config(String),
}

/// Errors raised by a [`GameStore`](crate::persistence::GameStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table} record {id} not found")]
    NotFound { table: &'static str, id: u64 },

    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Errors raised by the [`SessionRecorder`](crate::persistence::SessionRecorder).
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience alias for engine results.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            EngineError::from(ValidationError::EmptyName).kind(),
            ErrorKind::Validation
        );
        assert_eq!(EngineError::Capacity { max: 4 }.kind(), ErrorKind::Capacity);
        assert_eq!(
            EngineError::MinimumPlayers { min: 2 }.kind(),
            ErrorKind::MinimumPlayers
        );
        assert_eq!(
            EngineError::InvalidState {
                operation: "take_turn",
                status: SessionStatus::Setup,
            }
            .kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn test_messages() {
        let err = EngineError::InsufficientPlayers { count: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "cannot start with 1 player(s): at least 2 are required"
        );

        let err = EngineError::InvalidState {
            operation: "take_turn",
            status: SessionStatus::Setup,
        };
        assert_eq!(
            err.to_string(),
            "`take_turn` is not allowed while the session is setup"
        );

        let err = EngineError::from(ValidationError::RollOutOfRange(7));
        assert_eq!(err.to_string(), "invalid input: die roll 7 is outside 1..=6");
    }

    #[test]
    fn test_recorder_error_wraps() {
        let err: RecorderError = StoreError::Backend("offline".into()).into();
        assert_eq!(err.to_string(), "storage backend failed: offline");

        let err: RecorderError = EngineError::Capacity { max: 4 }.into();
        assert!(matches!(err, RecorderError::Engine(EngineError::Capacity { .. })));
    }
}
