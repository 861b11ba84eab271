//! Compact binary snapshots of a whole session.
//!
//! Decoding re-runs the session invariants, so a tampered or truncated
//! snapshot never reaches the engine. A checkpoint adds the dice state so a
//! resumed game rolls exactly what the original would have.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, GameRngState};
use crate::error::StoreError;
use crate::rules::{GameSession, TurnEngine};

fn corrupt(err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

impl GameSession {
    /// Encode the session, history included, with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(corrupt)
    }

    /// Decode bytes from [`GameSession::to_bytes`] and check the invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let session: GameSession = bincode::deserialize(bytes).map_err(corrupt)?;
        session.validate().map_err(corrupt)?;
        Ok(session)
    }
}

/// Encode the session behind `engine`.
pub fn encode(engine: &TurnEngine) -> Result<Vec<u8>, StoreError> {
    engine.session().to_bytes()
}

/// Decode and validate a snapshot produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<TurnEngine, StoreError> {
    TurnEngine::from_session(GameSession::from_bytes(bytes)?).map_err(corrupt)
}

#[derive(Serialize)]
struct CheckpointRef<'a> {
    session: &'a GameSession,
    dice: GameRngState,
}

#[derive(Deserialize)]
struct Checkpoint {
    session: GameSession,
    dice: GameRngState,
}

/// Encode the session together with the position of its dice.
pub fn encode_checkpoint(engine: &TurnEngine, dice: &GameRng) -> Result<Vec<u8>, StoreError> {
    let checkpoint = CheckpointRef {
        session: engine.session(),
        dice: dice.state(),
    };
    bincode::serialize(&checkpoint).map_err(corrupt)
}

/// Decode a checkpoint from [`encode_checkpoint`], restoring engine and dice.
pub fn decode_checkpoint(bytes: &[u8]) -> Result<(TurnEngine, GameRng), StoreError> {
    let checkpoint: Checkpoint = bincode::deserialize(bytes).map_err(corrupt)?;
    let engine = TurnEngine::from_session(checkpoint.session).map_err(corrupt)?;
    Ok((engine, GameRng::from_state(&checkpoint.dice)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;

    fn engine() -> TurnEngine {
        let mut engine = TurnEngine::new(&SessionConfig::default().with_seed(8));
        engine.add_player("Ada").unwrap();
        engine.add_player("Bo").unwrap();
        engine.add_player("Cy").unwrap();
        engine.start().unwrap();
        engine.take_turn(6).unwrap();
        engine.take_turn(2).unwrap();
        engine
    }

    #[test]
    fn test_snapshot_restores_history() {
        let engine = engine();
        let bytes = encode(&engine).unwrap();
        let restored = decode(&bytes).unwrap();
        assert_eq!(restored, engine);
        assert_eq!(restored.session().history().len(), 2);
    }

    #[test]
    fn test_truncated_snapshot() {
        let bytes = encode(&engine()).unwrap();
        let err = decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_session_bytes_revalidate() {
        let engine = engine();
        let bytes = engine.session().to_bytes().unwrap();
        assert_eq!(&GameSession::from_bytes(&bytes).unwrap(), engine.session());

        let mut broken = engine.into_session();
        broken.current_player_index = 7;
        let bytes = broken.to_bytes().unwrap();
        assert!(matches!(GameSession::from_bytes(&bytes), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_checkpoint_resumes_dice() {
        let mut engine = engine();
        let mut dice = GameRng::new(3).for_context("dice");
        engine.roll_and_take_turn(&mut dice).unwrap();

        let bytes = encode_checkpoint(&engine, &dice).unwrap();
        let (mut resumed, mut resumed_dice) = decode_checkpoint(&bytes).unwrap();
        assert_eq!(resumed, engine);

        for _ in 0..5 {
            if engine.session().is_completed() {
                break;
            }
            let expected = engine.roll_and_take_turn(&mut dice).unwrap();
            let actual = resumed.roll_and_take_turn(&mut resumed_dice).unwrap();
            assert_eq!(actual, expected);
        }
    }
}
