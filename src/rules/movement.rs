//! Movement resolution: one roll from one position.
//!
//! `candidate = position + roll`. A candidate at or past the final cell wins
//! and is capped there. Otherwise the element starting on the candidate, if
//! any, is applied exactly once. Destinations are never re-checked, so two
//! elements chained end-to-start cannot loop.

use serde::{Deserialize, Serialize};

use crate::board::{BoardElements, ElementKind};
use crate::core::{BoardSize, Cell, DIE_FACES};
use crate::error::ValidationError;

/// Category of a resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Normal,
    LadderClimb,
    SnakeBite,
    Win,
}

impl Outcome {
    #[must_use]
    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }
}

/// Result of resolving one roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub to: Cell,
    pub outcome: Outcome,
}

/// Resolves moves against one board.
#[derive(Clone, Copy, Debug)]
pub struct MovementResolver<'a> {
    size: BoardSize,
    elements: &'a BoardElements,
}

impl<'a> MovementResolver<'a> {
    #[must_use]
    pub fn new(size: BoardSize, elements: &'a BoardElements) -> Self {
        Self { size, elements }
    }

    /// Resolve `roll` from `position`.
    ///
    /// Fails if the roll is outside `1..=6` or the position is off the board.
    pub fn resolve(&self, position: Cell, roll: u8) -> Result<Move, ValidationError> {
        check_roll(roll)?;
        let final_cell = self.size.final_cell();
        if !self.size.contains(position) {
            return Err(ValidationError::PositionOutOfRange {
                position,
                final_cell,
            });
        }

        let candidate = position + Cell::from(roll);
        if candidate >= final_cell {
            return Ok(Move {
                to: final_cell,
                outcome: Outcome::Win,
            });
        }

        let mv = match self.elements.at(candidate) {
            None => Move {
                to: candidate,
                outcome: Outcome::Normal,
            },
            Some(e) if e.kind == ElementKind::Ladder => Move {
                to: e.end,
                outcome: Outcome::LadderClimb,
            },
            Some(e) => Move {
                to: e.end,
                outcome: Outcome::SnakeBite,
            },
        };
        Ok(mv)
    }
}

/// Resolve one roll; see [`MovementResolver::resolve`].
pub fn resolve(
    position: Cell,
    size: BoardSize,
    roll: u8,
    elements: &BoardElements,
) -> Result<Move, ValidationError> {
    MovementResolver::new(size, elements).resolve(position, roll)
}

/// Reject die values outside `1..=6`.
pub fn check_roll(roll: u8) -> Result<(), ValidationError> {
    if (1..=DIE_FACES).contains(&roll) {
        Ok(())
    } else {
        Err(ValidationError::RollOutOfRange(roll))
    }
}
