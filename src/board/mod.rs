//! Board elements and their procedural generation.
//!
//! - `BoardElement`: a snake or ladder between two cells
//! - `BoardElements`: the validated, start-indexed set for one board
//! - `BoardElementGenerator`: mode-driven random placement

pub mod element;
pub mod generator;

pub use element::{BoardElement, BoardElements, ElementId, ElementKind};
pub use generator::{generate, BoardElementGenerator};
