//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::PlayerId;
use crate::error::EngineError;
use crate::rules::{Outcome, TurnResult};

/// Map an engine error onto `ValueError`, prefixed with its kind.
pub(crate) fn to_py_err(err: EngineError) -> PyErr {
    PyValueError::new_err(format!("{:?}: {}", err.kind(), err))
}

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    #[new]
    fn new(id: u8) -> Self {
        Self(PlayerId::new(id))
    }

    /// Get the raw ID value.
    #[getter]
    fn id(&self) -> u8 {
        self.0.raw()
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0.raw())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0.raw())
    }
}

/// Python wrapper for TurnResult.
#[pyclass(name = "TurnResult")]
#[derive(Clone, Debug)]
pub struct PyTurnResult(pub TurnResult);

#[pymethods]
impl PyTurnResult {
    #[getter]
    fn player_id(&self) -> PyPlayerId {
        PyPlayerId(self.0.player_id)
    }

    #[getter]
    fn turn(&self) -> u32 {
        self.0.turn
    }

    #[getter]
    fn roll(&self) -> u8 {
        self.0.roll
    }

    #[getter]
    fn from_position(&self) -> u32 {
        self.0.from
    }

    #[getter]
    fn to_position(&self) -> u32 {
        self.0.to
    }

    /// One of "normal", "ladder_climb", "snake_bite", "win".
    #[getter]
    fn outcome(&self) -> &'static str {
        match self.0.outcome {
            Outcome::Normal => "normal",
            Outcome::LadderClimb => "ladder_climb",
            Outcome::SnakeBite => "snake_bite",
            Outcome::Win => "win",
        }
    }

    fn describe(&self, player_name: &str) -> String {
        self.0.describe(player_name)
    }

    fn __repr__(&self) -> String {
        format!(
            "TurnResult(player={}, roll={}, {} -> {}, {})",
            self.0.player_id.raw(),
            self.0.roll,
            self.0.from,
            self.0.to,
            self.outcome()
        )
    }
}
