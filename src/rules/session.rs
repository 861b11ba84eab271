//! Game session state and turn results.
//!
//! ## GameSession
//!
//! One playthrough: board, roster, turn cursor, status and winner. Only the
//! [`TurnEngine`](super::TurnEngine) mutates it; everything else sees a
//! read-only view through the accessors.
//!
//! Uses `im::Vector` for the turn history so snapshots clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::movement::Outcome;
use crate::board::BoardElements;
use crate::core::{BoardSize, Cell, GameMode, Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{EngineError, ValidationError};

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Accumulating players.
    #[default]
    Setup,
    InProgress,
    /// Terminal until reset.
    Completed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Setup => f.write_str("setup"),
            SessionStatus::InProgress => f.write_str("in progress"),
            SessionStatus::Completed => f.write_str("completed"),
        }
    }
}

/// What happened on one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub player_id: PlayerId,
    /// 1-based turn counter within the session.
    pub turn: u32,
    pub roll: u8,
    pub from: Cell,
    pub to: Cell,
    pub outcome: Outcome,
}

impl TurnResult {
    /// Short message for a toast or log line.
    #[must_use]
    pub fn describe(&self, player_name: &str) -> String {
        match self.outcome {
            Outcome::Win => format!("{} wins the game!", player_name),
            Outcome::LadderClimb => format!(
                "Wow! {} found a ladder! Climbing up to {}.",
                player_name, self.to
            ),
            Outcome::SnakeBite => format!(
                "Oops! {} got bitten by a snake! Moving down to {}.",
                player_name, self.to
            ),
            Outcome::Normal => format!("{} rolled {} and moved to {}.", player_name, self.roll, self.to),
        }
    }
}

/// One playthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) board_size: BoardSize,
    pub(crate) mode: GameMode,
    pub(crate) elements: BoardElements,
    pub(crate) players: SmallVec<[Player; MAX_PLAYERS]>,
    pub(crate) current_player_index: usize,
    pub(crate) status: SessionStatus,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) turn_number: u32,
    pub(crate) history: Vector<TurnResult>,
    pub(crate) next_player_id: u8,
}

impl GameSession {
    /// Fresh session in `Setup` with no players.
    pub(crate) fn new(board_size: BoardSize, mode: GameMode, elements: BoardElements) -> Self {
        Self {
            board_size,
            mode,
            elements,
            players: SmallVec::new(),
            current_player_index: 0,
            status: SessionStatus::Setup,
            winner: None,
            turn_number: 0,
            history: Vector::new(),
            next_player_id: 0,
        }
    }

    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn elements(&self) -> &BoardElements {
        &self.elements
    }

    /// Roster in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Whose turn it is. `None` while the roster is empty.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Set only when the session is completed.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    /// Turns resolved since the last start or reset.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnResult> {
        &self.history
    }

    /// Check the structural invariants of a session built outside the engine.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.elements.validate_for(self.board_size)?;

        if self.players.len() > MAX_PLAYERS {
            return Err(EngineError::Capacity { max: MAX_PLAYERS });
        }
        for (i, player) in self.players.iter().enumerate() {
            if !self.board_size.contains(player.position) {
                return Err(ValidationError::PositionOutOfRange {
                    position: player.position,
                    final_cell: self.board_size.final_cell(),
                }
                .into());
            }
            if self.players[..i].iter().any(|p| p.id == player.id) {
                return Err(ValidationError::Config(format!("duplicate player id {}", player.id)).into());
            }
            if player.id.raw() >= self.next_player_id {
                return Err(ValidationError::Config(format!(
                    "player id {} was never issued",
                    player.id
                ))
                .into());
            }
        }

        if self.status != SessionStatus::Setup && self.players.len() < MIN_PLAYERS {
            return Err(EngineError::InsufficientPlayers {
                count: self.players.len(),
                min: MIN_PLAYERS,
            });
        }
        if !self.players.is_empty() && self.current_player_index >= self.players.len() {
            return Err(ValidationError::Config(format!(
                "turn cursor {} is past the roster",
                self.current_player_index
            ))
            .into());
        }

        match (self.status, self.winner) {
            (SessionStatus::Completed, Some(id)) => {
                if self.player(id).is_none() {
                    return Err(ValidationError::UnknownPlayer(id).into());
                }
            }
            (SessionStatus::Completed, None) => {
                return Err(ValidationError::Config("completed session has no winner".into()).into());
            }
            (_, Some(_)) => {
                return Err(ValidationError::Config("winner set on an unfinished session".into()).into());
            }
            (_, None) => {}
        }
        Ok(())
    }
}
