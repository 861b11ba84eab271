//! Python bindings for the snakes-ladders rules engine.
//!
//! # Quick Start
//!
//! ```python
//! import snakes_ladders as sl
//!
//! session = sl.Session(board_size=10, mode="speed", seed=42)
//! session.add_player("Ada")
//! session.add_player("Bo")
//! session.start()
//!
//! while session.status != "completed":
//!     result = session.roll()
//!     print(result.describe("Ada"))
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// snakes_ladders: board generation, movement and turn flow.
#[pymodule]
fn snakes_ladders(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PyTurnResult>()?;
    m.add_class::<PySession>()?;
    Ok(())
}
