//! Adapter that mirrors engine transitions into a [`GameStore`].
//!
//! The engine resolves a turn first; the recorder writes afterwards. A failed
//! write is logged and returned, but the in-memory move stands.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::records::{ElementRecord, GameId, GameRecord, PlayerRecord, RecordId};
use super::store::GameStore;
use crate::board::BoardElements;
use crate::core::{Player, PlayerColor, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{EngineError, RecorderError, StoreError, ValidationError};
use crate::rules::{GameSession, SessionStatus, TurnEngine, TurnResult};

/// Persists sessions through a store.
#[derive(Debug)]
pub struct SessionRecorder<S> {
    store: S,
}

impl<S: GameStore> SessionRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Write a new game with its players and board.
    ///
    /// Only started games with a full roster are saved. If any write after
    /// the game record fails, the partial game is removed before the error
    /// is returned.
    pub fn create(&mut self, name: &str, engine: &TurnEngine) -> Result<GameId, RecorderError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::from(ValidationError::EmptyGameName).into());
        }
        let session = engine.session();
        let count = session.players().len();
        if count < MIN_PLAYERS {
            return Err(EngineError::InsufficientPlayers { count, min: MIN_PLAYERS }.into());
        }
        if session.status() == SessionStatus::Setup {
            return Err(EngineError::InvalidState {
                operation: "create",
                status: session.status(),
            }
            .into());
        }
        let game_id = self.store.create_game(game_record(RecordId::default(), name, session))?;

        if let Err(err) = self.write_children(game_id, session) {
            warn!(game = %game_id, error = %err, "game creation failed, rolling back");
            if let Err(cleanup) = self.delete(game_id) {
                warn!(game = %game_id, error = %cleanup, "rollback incomplete");
            }
            return Err(err.into());
        }

        debug!(
            game = %game_id,
            players = session.players().len(),
            elements = session.elements().len(),
            "game created"
        );
        Ok(game_id)
    }

    fn write_children(&mut self, game_id: GameId, session: &GameSession) -> Result<(), StoreError> {
        for player in session.players() {
            self.store.create_player(PlayerRecord::from_player(game_id, player))?;
        }
        for element in session.elements() {
            self.store.create_element(ElementRecord::from_element(game_id, element))?;
        }
        Ok(())
    }

    /// Write the mover's position and the game's turn state after `result`.
    pub fn record_turn(
        &mut self,
        game_id: GameId,
        engine: &TurnEngine,
        result: &TurnResult,
    ) -> Result<(), RecorderError> {
        let outcome = self.write_turn(game_id, engine.session(), result);
        if let Err(err) = &outcome {
            warn!(
                game = %game_id,
                player = %result.player_id,
                turn = result.turn,
                error = %err,
                "failed to save turn; keeping local state"
            );
        }
        outcome
    }

    fn write_turn(
        &mut self,
        game_id: GameId,
        session: &GameSession,
        result: &TurnResult,
    ) -> Result<(), RecorderError> {
        let mut record = self
            .store
            .players_for_game(game_id)?
            .into_iter()
            .find(|p| p.player_id == result.player_id)
            .ok_or(ValidationError::UnknownPlayer(result.player_id))
            .map_err(EngineError::from)?;
        record.position = result.to;
        self.store.update_player(&record)?;

        let mut game = self.store.game(game_id)?;
        sync_game(&mut game, session);
        self.store.update_game(&game)?;
        Ok(())
    }

    /// Write the reset state: in progress, no winner, everyone on cell 1.
    pub fn record_reset(&mut self, game_id: GameId, engine: &TurnEngine) -> Result<(), RecorderError> {
        let outcome = self.write_reset(game_id, engine.session());
        if let Err(err) = &outcome {
            warn!(game = %game_id, error = %err, "failed to save reset; keeping local state");
        }
        outcome
    }

    fn write_reset(&mut self, game_id: GameId, session: &GameSession) -> Result<(), RecorderError> {
        let mut game = self.store.game(game_id)?;
        sync_game(&mut game, session);
        self.store.update_game(&game)?;

        for mut record in self.store.players_for_game(game_id)? {
            if let Some(player) = session.player(record.player_id) {
                record.position = player.position;
                self.store.update_player(&record)?;
            }
        }
        debug!(game = %game_id, "reset saved");
        Ok(())
    }

    /// Rebuild an engine from stored records.
    pub fn load(&self, game_id: GameId) -> Result<TurnEngine, RecorderError> {
        let game = self.store.game(game_id)?;

        let mut players: SmallVec<[Player; MAX_PLAYERS]> = SmallVec::new();
        let mut records = self.store.players_for_game(game_id)?;
        records.sort_by_key(|p| p.player_id);
        if records.len() > MAX_PLAYERS {
            return Err(EngineError::Capacity { max: MAX_PLAYERS }.into());
        }
        for record in records {
            let color = PlayerColor::from_hex(&record.color).ok_or_else(|| {
                StoreError::Corrupt(format!("player {} has unknown color {}", record.id, record.color))
            })?;
            players.push(Player {
                id: record.player_id,
                display_name: record.name,
                color,
                position: record.position,
            });
        }

        let elements = self
            .store
            .elements_for_game(game_id)?
            .iter()
            .map(ElementRecord::to_element)
            .collect();
        let elements = BoardElements::new(elements).map_err(EngineError::from)?;

        let next_player_id = players
            .iter()
            .map(|p| p.id.raw())
            .max()
            .map_or(0, |max| max.saturating_add(1));

        let session = GameSession {
            board_size: game.board_size,
            mode: game.mode,
            elements,
            players,
            current_player_index: game.current_player_index,
            status: game.status,
            winner: game.winner_id,
            turn_number: game.turn_number,
            history: im::Vector::new(),
            next_player_id,
        };
        Ok(TurnEngine::from_session(session)?)
    }

    /// Remove a game with its elements and players.
    pub fn delete(&mut self, game_id: GameId) -> Result<(), StoreError> {
        self.store.delete_elements_for_game(game_id)?;
        for record in self.store.players_for_game(game_id)? {
            self.store.delete_player(record.id)?;
        }
        self.store.delete_game(game_id)
    }

    /// Games for the dashboard, most recently modified first.
    pub fn list_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        self.store.list_games()
    }
}

fn game_record(id: GameId, name: &str, session: &GameSession) -> GameRecord {
    let mut record = GameRecord {
        id,
        name: name.to_string(),
        mode: session.mode(),
        board_size: session.board_size(),
        status: session.status(),
        winner_id: None,
        current_player_index: 0,
        turn_number: 0,
        modified: 0,
    };
    sync_game(&mut record, session);
    record
}

fn sync_game(record: &mut GameRecord, session: &GameSession) {
    record.status = session.status();
    record.winner_id = session.winner();
    record.current_player_index = session.current_player_index();
    record.turn_number = session.turn_number();
}
