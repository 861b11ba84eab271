//! Turn engine: roster management and the session state machine.
//!
//! ```text
//! Setup --start()--> InProgress --take_turn() wins--> Completed
//!   ^                    ^                                |
//!   |                    +------------reset()-------------+
//! ```
//!
//! Every operation validates before it mutates, so a rejected call leaves
//! the session untouched.

use tracing::{debug, info};

use super::movement::MovementResolver;
use super::session::{GameSession, SessionStatus, TurnResult};
use crate::board::{self, BoardElements};
use crate::core::{
    BoardSize, GameMode, GameRng, Player, PlayerColor, PlayerId, RandomSource, SessionConfig,
    MAX_PLAYERS, MIN_PLAYERS, START_CELL,
};
use crate::error::{EngineError, ValidationError};

/// Drives one [`GameSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnEngine {
    session: GameSession,
}

impl TurnEngine {
    /// Create a session from configuration, generating its board.
    ///
    /// Board generation draws from the `"board"` context of the seed, so
    /// dice seeded from the same value do not replay board draws.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut board_rng = rng.for_context("board");
        Self::generate(config.board_size, config.mode, &mut board_rng)
    }

    /// Create a session with a board drawn from `rng`.
    pub fn generate(size: BoardSize, mode: GameMode, rng: &mut impl RandomSource) -> Self {
        let elements = board::generate(size, mode, rng);
        Self {
            session: GameSession::new(size, mode, elements),
        }
    }

    /// Create a session on a fixed board.
    pub fn with_elements(
        size: BoardSize,
        mode: GameMode,
        elements: BoardElements,
    ) -> Result<Self, EngineError> {
        elements.validate_for(size)?;
        Ok(Self {
            session: GameSession::new(size, mode, elements),
        })
    }

    /// Resume a previously captured session.
    pub fn from_session(session: GameSession) -> Result<Self, EngineError> {
        session.validate()?;
        Ok(Self { session })
    }

    /// Read-only view for rendering and persistence.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// Add a player to the roster. Only valid during setup.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, EngineError> {
        self.require(SessionStatus::Setup, "add_player")?;
        if self.session.players.len() >= MAX_PLAYERS {
            return Err(EngineError::Capacity { max: MAX_PLAYERS });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let id = self.issue_player_id();
        let color = PlayerColor::for_slot(self.session.players.len());
        self.session.players.push(Player::new(id, name, color));
        debug!(player = %id, name, color = color.hex(), "player added");
        Ok(id)
    }

    /// Remove a player from the roster. Only valid during setup.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, EngineError> {
        self.require(SessionStatus::Setup, "remove_player")?;
        if self.session.players.len() <= MIN_PLAYERS {
            return Err(EngineError::MinimumPlayers { min: MIN_PLAYERS });
        }
        let index = self
            .session
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(ValidationError::UnknownPlayer(id))?;

        let removed = self.session.players.remove(index);
        debug!(player = %id, "player removed");
        Ok(removed)
    }

    /// Leave setup and begin play with the first player.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.require(SessionStatus::Setup, "start")?;
        let count = self.session.players.len();
        if count < MIN_PLAYERS {
            return Err(EngineError::InsufficientPlayers {
                count,
                min: MIN_PLAYERS,
            });
        }
        self.session.status = SessionStatus::InProgress;
        self.session.current_player_index = 0;
        info!(
            players = count,
            board = %self.session.board_size,
            mode = %self.session.mode,
            elements = self.session.elements.len(),
            "game started"
        );
        Ok(())
    }

    /// Move the current player by `roll`.
    ///
    /// On a win the session completes and the turn cursor stays on the
    /// winner; otherwise it advances to the next player.
    pub fn take_turn(&mut self, roll: u8) -> Result<TurnResult, EngineError> {
        self.require(SessionStatus::InProgress, "take_turn")?;

        let session = &mut self.session;
        let index = session.current_player_index;
        let player = &session.players[index];
        let (player_id, from) = (player.id, player.position);
        let mv = MovementResolver::new(session.board_size, &session.elements).resolve(from, roll)?;

        session.players[index].position = mv.to;
        session.turn_number += 1;
        let result = TurnResult {
            player_id,
            turn: session.turn_number,
            roll,
            from,
            to: mv.to,
            outcome: mv.outcome,
        };
        session.history.push_back(result.clone());

        debug!(
            player = %player_id,
            turn = result.turn,
            roll,
            from,
            to = mv.to,
            outcome = ?mv.outcome,
            "turn resolved"
        );

        if mv.outcome.is_win() {
            session.status = SessionStatus::Completed;
            session.winner = Some(player_id);
            info!(winner = %player_id, turns = session.turn_number, "game completed");
        } else {
            session.current_player_index = (index + 1) % session.players.len();
        }
        Ok(result)
    }

    /// Roll a die from `dice` and take the turn with it.
    pub fn roll_and_take_turn(&mut self, dice: &mut impl RandomSource) -> Result<TurnResult, EngineError> {
        self.require(SessionStatus::InProgress, "take_turn")?;
        let roll = dice.roll_die();
        self.take_turn(roll)
    }

    /// Put every player back on cell 1 and play again on the same board.
    ///
    /// Valid from any state that has at least two players.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let count = self.session.players.len();
        if count < MIN_PLAYERS {
            return Err(EngineError::InsufficientPlayers {
                count,
                min: MIN_PLAYERS,
            });
        }
        let session = &mut self.session;
        for player in &mut session.players {
            player.position = START_CELL;
        }
        session.winner = None;
        session.current_player_index = 0;
        session.status = SessionStatus::InProgress;
        session.turn_number = 0;
        session.history = im::Vector::new();
        info!("game reset");
        Ok(())
    }

    /// Next id from the counter, or the lowest free id once it runs out.
    fn issue_player_id(&mut self) -> PlayerId {
        let session = &mut self.session;
        if let Some(next) = session.next_player_id.checked_add(1) {
            let id = PlayerId::new(session.next_player_id);
            session.next_player_id = next;
            return id;
        }
        // At most MAX_PLAYERS ids are live, so a free one always exists below the counter.
        (0..session.next_player_id)
            .map(PlayerId::new)
            .find(|id| session.players.iter().all(|p| p.id != *id))
            .unwrap_or(PlayerId::new(0))
    }

    fn require(&self, status: SessionStatus, operation: &'static str) -> Result<(), EngineError> {
        if self.session.status == status {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                status: self.session.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardElement, ElementId};
    use crate::core::ScriptedSource;
    use crate::rules::Outcome;

    fn engine_with_ladder() -> TurnEngine {
        let elements = BoardElements::new(vec![
            BoardElement::ladder(ElementId::new(0), 4, 14),
            BoardElement::snake(ElementId::new(1), 30, 8),
        ])
        .unwrap();
        TurnEngine::with_elements(BoardSize::CLASSIC, GameMode::Classic, elements).unwrap()
    }

    fn two_player_game() -> (TurnEngine, PlayerId, PlayerId) {
        let mut engine = engine_with_ladder();
        let p1 = engine.add_player("Ada").unwrap();
        let p2 = engine.add_player("Bo").unwrap();
        engine.start().unwrap();
        (engine, p1, p2)
    }

    #[test]
    fn test_add_player_assigns_palette() {
        let mut engine = engine_with_ladder();
        for name in ["A", "B", "C", "D"] {
            engine.add_player(name).unwrap();
        }
        let colors: Vec<_> = engine.session().players().iter().map(|p| p.color).collect();
        assert_eq!(colors, PlayerColor::PALETTE.to_vec());
        assert!(engine.session().players().iter().all(|p| p.position == 1));
    }

    #[test]
    fn test_add_player_capacity() {
        let mut engine = engine_with_ladder();
        for name in ["A", "B", "C", "D"] {
            engine.add_player(name).unwrap();
        }
        let before = engine.clone();
        assert_eq!(engine.add_player("E"), Err(EngineError::Capacity { max: 4 }));
        assert_eq!(engine.session().players().len(), 4);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_add_player_empty_name() {
        let mut engine = engine_with_ladder();
        assert_eq!(
            engine.add_player("   "),
            Err(EngineError::Validation(ValidationError::EmptyName))
        );
        assert!(engine.session().players().is_empty());

        let id = engine.add_player("  Ada  ").unwrap();
        assert_eq!(engine.session().player(id).unwrap().display_name, "Ada");
    }

    #[test]
    fn test_remove_player() {
        let mut engine = engine_with_ladder();
        let a = engine.add_player("A").unwrap();
        let b = engine.add_player("B").unwrap();
        let c = engine.add_player("C").unwrap();

        let removed = engine.remove_player(b).unwrap();
        assert_eq!(removed.id, b);
        let ids: Vec<_> = engine.session().players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, c]);

        // Ids are not reused while the counter lasts.
        let d = engine.add_player("D").unwrap();
        assert_ne!(d, b);
    }

    #[test]
    fn test_roster_churn_outlasts_id_counter() {
        let mut engine = engine_with_ladder();
        let a = engine.add_player("A").unwrap();
        let b = engine.add_player("B").unwrap();

        for _ in 0..300 {
            let c = engine.add_player("C").unwrap();
            assert_ne!(c, a);
            assert_ne!(c, b);
            engine.remove_player(c).unwrap();
        }

        let c = engine.add_player("C").unwrap();
        let d = engine.add_player("D").unwrap();
        assert_ne!(c, d);
        assert_eq!(engine.add_player("E"), Err(EngineError::Capacity { max: 4 }));
        assert!(engine.session().validate().is_ok());
        engine.start().unwrap();
    }

    #[test]
    fn test_remove_player_minimum() {
        let mut engine = engine_with_ladder();
        let a = engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        let before = engine.clone();

        assert_eq!(engine.remove_player(a), Err(EngineError::MinimumPlayers { min: 2 }));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_remove_unknown_player() {
        let mut engine = engine_with_ladder();
        for name in ["A", "B", "C"] {
            engine.add_player(name).unwrap();
        }
        assert_eq!(
            engine.remove_player(PlayerId::new(9)),
            Err(EngineError::Validation(ValidationError::UnknownPlayer(PlayerId::new(9))))
        );
        assert_eq!(engine.session().players().len(), 3);
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut engine = engine_with_ladder();
        engine.add_player("A").unwrap();
        assert_eq!(
            engine.start(),
            Err(EngineError::InsufficientPlayers { count: 1, min: 2 })
        );
        assert_eq!(engine.session().status(), SessionStatus::Setup);

        engine.add_player("B").unwrap();
        engine.start().unwrap();
        assert_eq!(engine.session().status(), SessionStatus::InProgress);
        assert_eq!(engine.session().current_player_index(), 0);
    }

    #[test]
    fn test_take_turn_before_start() {
        let mut engine = engine_with_ladder();
        engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        assert_eq!(
            engine.take_turn(3),
            Err(EngineError::InvalidState {
                operation: "take_turn",
                status: SessionStatus::Setup,
            })
        );
    }

    #[test]
    fn test_roster_locked_after_start() {
        let (mut engine, p1, _) = two_player_game();
        assert!(matches!(
            engine.add_player("C"),
            Err(EngineError::InvalidState { operation: "add_player", .. })
        ));
        assert!(matches!(
            engine.remove_player(p1),
            Err(EngineError::InvalidState { operation: "remove_player", .. })
        ));
        assert!(matches!(engine.start(), Err(EngineError::InvalidState { .. })));
    }

    #[test]
    fn test_turns_alternate() {
        let (mut engine, p1, p2) = two_player_game();

        let r = engine.take_turn(1).unwrap();
        assert_eq!((r.player_id, r.from, r.to, r.outcome), (p1, 1, 2, Outcome::Normal));
        assert_eq!(engine.session().current_player_index(), 1);

        let r = engine.take_turn(5).unwrap();
        assert_eq!(r.player_id, p2);
        assert_eq!(r.to, 6);
        assert_eq!(engine.session().current_player_index(), 0);
        assert_eq!(engine.session().turn_number(), 2);
        assert_eq!(engine.session().history().len(), 2);
    }

    #[test]
    fn test_ladder_from_two() {
        let (mut engine, p1, _) = two_player_game();
        engine.take_turn(1).unwrap(); // p1 -> 2
        engine.take_turn(6).unwrap(); // p2 -> 7

        let r = engine.take_turn(2).unwrap();
        assert_eq!(r.player_id, p1);
        assert_eq!(r.from, 2);
        assert_eq!(r.outcome, Outcome::LadderClimb);
        assert_eq!(r.to, 14);
        assert_eq!(engine.session().player(p1).unwrap().position, 14);
    }

    #[test]
    fn test_bad_roll_leaves_state() {
        let (mut engine, _, _) = two_player_game();
        let before = engine.clone();
        assert_eq!(
            engine.take_turn(7),
            Err(EngineError::Validation(ValidationError::RollOutOfRange(7)))
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_win_keeps_cursor() {
        let (mut engine, p1, _) = two_player_game();
        engine.session.players[0].position = 97;

        let before_index = engine.session().current_player_index();
        let r = engine.take_turn(5).unwrap();

        assert_eq!(r.outcome, Outcome::Win);
        assert_eq!(r.to, 100);
        assert_eq!(engine.session().status(), SessionStatus::Completed);
        assert_eq!(engine.session().winner(), Some(p1));
        assert_eq!(engine.session().current_player_index(), before_index);
        assert!(matches!(engine.take_turn(1), Err(EngineError::InvalidState { .. })));
    }

    #[test]
    fn test_reset_idempotent() {
        let (mut engine, _, _) = two_player_game();
        engine.session.players[1].position = 98;
        engine.take_turn(3).unwrap();
        engine.take_turn(2).unwrap();
        assert!(engine.session().is_completed());

        engine.reset().unwrap();
        let once = engine.clone();
        engine.reset().unwrap();
        assert_eq!(engine, once);

        let s = engine.session();
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.winner(), None);
        assert_eq!(s.current_player_index(), 0);
        assert_eq!(s.turn_number(), 0);
        assert!(s.history().is_empty());
        assert!(s.players().iter().all(|p| p.position == 1));
    }

    #[test]
    fn test_reset_keeps_board() {
        let mut engine = TurnEngine::new(&SessionConfig::default().with_seed(11));
        engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        engine.start().unwrap();
        let board = engine.session().elements().clone();
        engine.take_turn(4).unwrap();
        engine.reset().unwrap();
        assert_eq!(engine.session().elements(), &board);
    }

    #[test]
    fn test_reset_needs_players() {
        let mut engine = engine_with_ladder();
        engine.add_player("A").unwrap();
        assert_eq!(
            engine.reset(),
            Err(EngineError::InsufficientPlayers { count: 1, min: 2 })
        );
        assert_eq!(engine.session().status(), SessionStatus::Setup);
    }

    #[test]
    fn test_roll_and_take_turn() {
        let (mut engine, p1, _) = two_player_game();
        let mut dice = ScriptedSource::new([3]);
        let r = engine.roll_and_take_turn(&mut dice).unwrap();
        assert_eq!(r.player_id, p1);
        assert_eq!(r.roll, 3);
        assert_eq!(r.to, 14, "1 + 3 lands on the ladder at 4");
    }

    #[test]
    fn test_seeded_sessions_match() {
        let config = SessionConfig::new(BoardSize::ADVANCED, GameMode::Challenge).with_seed(99);
        assert_eq!(TurnEngine::new(&config), TurnEngine::new(&config));
    }

    #[test]
    fn test_with_elements_checks_board() {
        let elements = BoardElements::new(vec![BoardElement::ladder(ElementId::new(0), 50, 70)]).unwrap();
        assert!(TurnEngine::with_elements(BoardSize::BEGINNER, GameMode::Classic, elements).is_err());
    }

    #[test]
    fn test_from_session_round_trip() {
        let (mut engine, _, _) = two_player_game();
        engine.take_turn(2).unwrap();
        let restored = TurnEngine::from_session(engine.session().clone()).unwrap();
        assert_eq!(restored, engine);
    }
}
