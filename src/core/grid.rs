//! Board geometry: cells, board size and the serpentine grid layout.
//!
//! Cells are numbered 1 to `size²`. Cell 1 is bottom-left; the track runs
//! left-to-right on the bottom row and alternates direction on every row
//! above it, so the final cell sits in the top row.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A cell number on the track, `1..=size²`.
pub type Cell = u32;

/// Every player starts here.
pub const START_CELL: Cell = 1;

/// Side length of a square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct BoardSize(u16);

impl BoardSize {
    /// Smallest board the engine accepts.
    pub const MIN: u16 = 2;
    /// Largest board the engine accepts.
    pub const MAX: u16 = 255;

    /// 8x8 board.
    pub const BEGINNER: BoardSize = BoardSize(8);
    /// 10x10 board.
    pub const CLASSIC: BoardSize = BoardSize(10);
    /// 12x12 board.
    pub const ADVANCED: BoardSize = BoardSize(12);

    /// Validate a side length.
    pub fn new(side: u16) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&side) {
            Ok(Self(side))
        } else {
            Err(ValidationError::BoardSize(side))
        }
    }

    /// Side length.
    #[must_use]
    pub const fn side(self) -> u16 {
        self.0
    }

    /// Total number of cells, `side²`.
    #[must_use]
    pub const fn cell_count(self) -> Cell {
        self.0 as Cell * self.0 as Cell
    }

    /// The winning cell.
    #[must_use]
    pub const fn final_cell(self) -> Cell {
        self.cell_count()
    }

    /// Is `cell` on the board?
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        (START_CELL..=self.final_cell()).contains(&cell)
    }

    /// Grid position of `cell`, with row 0 at the top and column 0 on the left.
    #[must_use]
    pub fn coordinates(self, cell: Cell) -> Option<GridPos> {
        if !self.contains(cell) {
            return None;
        }
        let side = Cell::from(self.0);
        let index = cell - 1;
        let row_from_bottom = index / side;
        let offset = index % side;
        let col = if row_from_bottom % 2 == 0 {
            offset
        } else {
            side - 1 - offset
        };
        Some(GridPos {
            row: (side - 1 - row_from_bottom) as u16,
            col: col as u16,
        })
    }

    /// Cell at a grid position; inverse of [`coordinates`](Self::coordinates).
    #[must_use]
    pub fn cell_at(self, pos: GridPos) -> Option<Cell> {
        if pos.row >= self.0 || pos.col >= self.0 {
            return None;
        }
        let side = Cell::from(self.0);
        let row_from_bottom = side - 1 - Cell::from(pos.row);
        let offset = if row_from_bottom % 2 == 0 {
            Cell::from(pos.col)
        } else {
            side - 1 - Cell::from(pos.col)
        };
        Some(row_from_bottom * side + offset + 1)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl TryFrom<u16> for BoardSize {
    type Error = ValidationError;

    fn try_from(side: u16) -> Result<Self, Self::Error> {
        Self::new(side)
    }
}

impl From<BoardSize> for u16 {
    fn from(size: BoardSize) -> u16 {
        size.0
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Row/column on the rendered grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: u16,
    pub col: u16,
}
