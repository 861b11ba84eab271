//! Storage collaborator trait and an in-memory implementation.

use rustc_hash::FxHashMap;

use super::records::{ElementRecord, GameId, GameRecord, PlayerRecord, RecordId};
use crate::error::StoreError;

/// Create/read/update/delete for game, player and board element records.
///
/// `create_*` ignore the record's `id` and return the one they assign.
pub trait GameStore {
    fn create_game(&mut self, record: GameRecord) -> Result<GameId, StoreError>;
    fn game(&self, id: GameId) -> Result<GameRecord, StoreError>;
    /// Most recently modified first.
    fn list_games(&self) -> Result<Vec<GameRecord>, StoreError>;
    fn update_game(&mut self, record: &GameRecord) -> Result<(), StoreError>;
    fn delete_game(&mut self, id: GameId) -> Result<(), StoreError>;

    fn create_player(&mut self, record: PlayerRecord) -> Result<RecordId, StoreError>;
    fn players_for_game(&self, game: GameId) -> Result<Vec<PlayerRecord>, StoreError>;
    fn update_player(&mut self, record: &PlayerRecord) -> Result<(), StoreError>;
    fn delete_player(&mut self, id: RecordId) -> Result<(), StoreError>;

    fn create_element(&mut self, record: ElementRecord) -> Result<RecordId, StoreError>;
    fn elements_for_game(&self, game: GameId) -> Result<Vec<ElementRecord>, StoreError>;
    fn delete_elements_for_game(&mut self, game: GameId) -> Result<(), StoreError>;
}

/// Store backed by hash maps. Ids are shared across tables and never reused.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    games: FxHashMap<RecordId, GameRecord>,
    players: FxHashMap<RecordId, PlayerRecord>,
    elements: FxHashMap<RecordId, ElementRecord>,
    next_id: u64,
    clock: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn require_game(&self, id: GameId) -> Result<(), StoreError> {
        if self.games.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound { table: "game", id: id.0 })
        }
    }

    /// Total records across all tables.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.games.len() + self.players.len() + self.elements.len()
    }
}

impl GameStore for MemoryStore {
    fn create_game(&mut self, mut record: GameRecord) -> Result<GameId, StoreError> {
        let id = self.alloc_id();
        record.id = id;
        record.modified = self.tick();
        self.games.insert(id, record);
        Ok(id)
    }

    fn game(&self, id: GameId) -> Result<GameRecord, StoreError> {
        self.games
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { table: "game", id: id.0 })
    }

    fn list_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut games: Vec<_> = self.games.values().cloned().collect();
        games.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(games)
    }

    fn update_game(&mut self, record: &GameRecord) -> Result<(), StoreError> {
        self.require_game(record.id)?;
        let mut record = record.clone();
        record.modified = self.tick();
        self.games.insert(record.id, record);
        Ok(())
    }

    fn delete_game(&mut self, id: GameId) -> Result<(), StoreError> {
        self.games
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { table: "game", id: id.0 })
    }

    fn create_player(&mut self, mut record: PlayerRecord) -> Result<RecordId, StoreError> {
        self.require_game(record.game_id)?;
        let id = self.alloc_id();
        record.id = id;
        self.players.insert(id, record);
        Ok(id)
    }

    fn players_for_game(&self, game: GameId) -> Result<Vec<PlayerRecord>, StoreError> {
        let mut players: Vec<_> = self
            .players
            .values()
            .filter(|p| p.game_id == game)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    fn update_player(&mut self, record: &PlayerRecord) -> Result<(), StoreError> {
        match self.players.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound { table: "player", id: record.id.0 }),
        }
    }

    fn delete_player(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.players
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { table: "player", id: id.0 })
    }

    fn create_element(&mut self, mut record: ElementRecord) -> Result<RecordId, StoreError> {
        self.require_game(record.game_id)?;
        let id = self.alloc_id();
        record.id = id;
        self.elements.insert(id, record);
        Ok(id)
    }

    fn elements_for_game(&self, game: GameId) -> Result<Vec<ElementRecord>, StoreError> {
        let mut elements: Vec<_> = self
            .elements
            .values()
            .filter(|e| e.game_id == game)
            .cloned()
            .collect();
        elements.sort_by_key(|e| e.element_id);
        Ok(elements)
    }

    fn delete_elements_for_game(&mut self, game: GameId) -> Result<(), StoreError> {
        self.elements.retain(|_, e| e.game_id != game);
        Ok(())
    }
}
