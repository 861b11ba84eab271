//! Session bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{BoardSize, GameMode, GameRng, PlayerId, SessionConfig};
use crate::persistence::snapshot;
use crate::rules::{SessionStatus, TurnEngine};

use super::py_core::{to_py_err, PyPlayerId, PyTurnResult};

fn parse_mode(mode: &str) -> PyResult<GameMode> {
    match mode {
        "classic" => Ok(GameMode::Classic),
        "speed" => Ok(GameMode::Speed),
        "challenge" => Ok(GameMode::Challenge),
        other => Err(PyValueError::new_err(format!("unknown game mode {:?}", other))),
    }
}

/// Python wrapper for a game session with its own dice.
#[pyclass(name = "Session")]
pub struct PySession {
    engine: TurnEngine,
    dice: GameRng,
}

#[pymethods]
impl PySession {
    /// Create a session and generate its board.
    ///
    /// # Arguments
    /// - board_size: Side length of the board (2-255)
    /// - mode: "classic", "speed" or "challenge"
    /// - seed: RNG seed for reproducible boards and dice
    #[new]
    #[pyo3(signature = (board_size = 10, mode = "classic", seed = None))]
    fn new(board_size: u16, mode: &str, seed: Option<u64>) -> PyResult<Self> {
        let size = BoardSize::new(board_size).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let config = SessionConfig {
            board_size: size,
            mode: parse_mode(mode)?,
            seed: Some(rng.seed()),
        };
        Ok(Self {
            engine: TurnEngine::new(&config),
            dice: rng.for_context("dice"),
        })
    }

    fn add_player(&mut self, name: &str) -> PyResult<PyPlayerId> {
        self.engine.add_player(name).map(PyPlayerId).map_err(to_py_err)
    }

    fn remove_player(&mut self, id: u8) -> PyResult<String> {
        self.engine
            .remove_player(PlayerId::new(id))
            .map(|p| p.display_name)
            .map_err(to_py_err)
    }

    fn start(&mut self) -> PyResult<()> {
        self.engine.start().map_err(to_py_err)
    }

    /// Take a turn with a given die value.
    fn take_turn(&mut self, roll: u8) -> PyResult<PyTurnResult> {
        self.engine.take_turn(roll).map(PyTurnResult).map_err(to_py_err)
    }

    /// Roll the session's die and take a turn.
    fn roll(&mut self) -> PyResult<PyTurnResult> {
        self.engine
            .roll_and_take_turn(&mut self.dice)
            .map(PyTurnResult)
            .map_err(to_py_err)
    }

    fn reset(&mut self) -> PyResult<()> {
        self.engine.reset().map_err(to_py_err)
    }

    /// "setup", "in_progress" or "completed".
    #[getter]
    fn status(&self) -> &'static str {
        match self.engine.session().status() {
            SessionStatus::Setup => "setup",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }

    #[getter]
    fn winner(&self) -> Option<PyPlayerId> {
        self.engine.session().winner().map(PyPlayerId)
    }

    #[getter]
    fn current_player(&self) -> Option<PyPlayerId> {
        self.engine.session().current_player().map(|p| PyPlayerId(p.id))
    }

    /// `(id, name, color, position)` per player in turn order.
    fn players(&self) -> Vec<(u8, String, &'static str, u32)> {
        self.engine
            .session()
            .players()
            .iter()
            .map(|p| (p.id.raw(), p.display_name.clone(), p.color.hex(), p.position))
            .collect()
    }

    /// `(kind, start, end)` per board element.
    fn elements(&self) -> Vec<(String, u32, u32)> {
        self.engine
            .session()
            .elements()
            .iter()
            .map(|e| (e.kind.to_string(), e.start, e.end))
            .collect()
    }

    /// Encode the session and the dice position as bytes.
    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = snapshot::encode_checkpoint(&self.engine, &self.dice)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Restore a session from `to_bytes` output; the dice continue where they stopped.
    #[staticmethod]
    fn from_bytes(data: &[u8]) -> PyResult<Self> {
        let (engine, dice) =
            snapshot::decode_checkpoint(data).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { engine, dice })
    }

    fn __repr__(&self) -> String {
        let session = self.engine.session();
        format!(
            "Session({}, {}, players={}, status={})",
            session.board_size(),
            session.mode(),
            session.players().len(),
            self.status()
        )
    }
}
