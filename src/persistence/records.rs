//! Stored record shapes: one game, its players and its board elements.

use serde::{Deserialize, Serialize};

use crate::board::{BoardElement, ElementId, ElementKind};
use crate::core::{BoardSize, Cell, GameMode, Player, PlayerId};
use crate::rules::SessionStatus;

/// Store-assigned record identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Games are keyed by their record id.
pub type GameId = RecordId;

/// `game` table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub name: String,
    pub mode: GameMode,
    pub board_size: BoardSize,
    pub status: SessionStatus,
    pub winner_id: Option<PlayerId>,
    pub current_player_index: usize,
    pub turn_number: u32,
    /// Store-maintained modification stamp; larger is newer.
    pub modified: u64,
}

/// `player` table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: RecordId,
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub name: String,
    pub position: Cell,
    /// CSS hex value.
    pub color: String,
}

impl PlayerRecord {
    pub(crate) fn from_player(game_id: GameId, player: &Player) -> Self {
        Self {
            id: RecordId::default(),
            game_id,
            player_id: player.id,
            name: player.display_name.clone(),
            position: player.position,
            color: player.color.hex().to_string(),
        }
    }
}

/// `board_element` table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: RecordId,
    pub game_id: GameId,
    pub element_id: ElementId,
    pub kind: ElementKind,
    pub start_position: Cell,
    pub end_position: Cell,
}

impl ElementRecord {
    pub(crate) fn from_element(game_id: GameId, element: &BoardElement) -> Self {
        Self {
            id: RecordId::default(),
            game_id,
            element_id: element.id,
            kind: element.kind,
            start_position: element.start,
            end_position: element.end,
        }
    }

    pub(crate) fn to_element(&self) -> BoardElement {
        BoardElement {
            id: self.element_id,
            kind: self.kind,
            start: self.start_position,
            end: self.end_position,
        }
    }
}
