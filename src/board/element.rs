//! Snakes, ladders and the validated element set of a board.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BoardSize, Cell};
use crate::error::ValidationError;

/// Element identifier, unique within a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u16);

impl ElementId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

/// Snake or ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Snake,
    Ladder,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Snake => f.write_str("snake"),
            ElementKind::Ladder => f.write_str("ladder"),
        }
    }
}

/// A snake or ladder tying `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Landing here triggers the element.
    pub start: Cell,
    /// Where the player ends up.
    pub end: Cell,
}

impl BoardElement {
    #[must_use]
    pub const fn ladder(id: ElementId, start: Cell, end: Cell) -> Self {
        Self {
            id,
            kind: ElementKind::Ladder,
            start,
            end,
        }
    }

    #[must_use]
    pub const fn snake(id: ElementId, start: Cell, end: Cell) -> Self {
        Self {
            id,
            kind: ElementKind::Snake,
            start,
            end,
        }
    }

    /// Ladders go up, snakes go down.
    #[must_use]
    pub fn has_valid_direction(&self) -> bool {
        match self.kind {
            ElementKind::Ladder => self.end > self.start,
            ElementKind::Snake => self.end < self.start,
        }
    }

    /// Both endpoints avoid the first and last cell of `size`.
    #[must_use]
    pub fn fits(&self, size: BoardSize) -> bool {
        let playable = 2..size.final_cell();
        playable.contains(&self.start) && playable.contains(&self.end)
    }
}

/// The immutable element set of a board, indexed by start cell.
///
/// Construction rejects wrong-way elements and shared start cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BoardElement>", into = "Vec<BoardElement>")]
pub struct BoardElements {
    elements: Vec<BoardElement>,
    by_start: FxHashMap<Cell, usize>,
}

impl BoardElements {
    /// Validate and index a list of elements.
    pub fn new(elements: Vec<BoardElement>) -> Result<Self, ValidationError> {
        let mut by_start = FxHashMap::default();
        for (i, element) in elements.iter().enumerate() {
            if !element.has_valid_direction() {
                return Err(ValidationError::ElementDirection {
                    kind: element.kind,
                    start: element.start,
                    end: element.end,
                });
            }
            if by_start.insert(element.start, i).is_some() {
                return Err(ValidationError::DuplicateStart(element.start));
            }
        }
        Ok(Self { elements, by_start })
    }

    /// Index elements the generator already guarantees are well formed.
    pub(crate) fn from_generated(elements: Vec<BoardElement>) -> Self {
        debug_assert!(
            elements.iter().all(BoardElement::has_valid_direction),
            "generator produced a wrong-way element"
        );
        let by_start: FxHashMap<Cell, usize> =
            elements.iter().enumerate().map(|(i, e)| (e.start, i)).collect();
        debug_assert_eq!(by_start.len(), elements.len(), "generator produced a shared start cell");
        Self { elements, by_start }
    }

    /// An empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check every element lies within the playable range of `size`.
    pub fn validate_for(&self, size: BoardSize) -> Result<(), ValidationError> {
        match self.elements.iter().find(|e| !e.fits(size)) {
            Some(e) => Err(ValidationError::ElementOutOfRange {
                kind: e.kind,
                start: e.start,
                end: e.end,
                max: size.final_cell() - 1,
            }),
            None => Ok(()),
        }
    }

    /// The element triggered by landing on `cell`.
    #[must_use]
    pub fn at(&self, cell: Cell) -> Option<&BoardElement> {
        self.by_start.get(&cell).map(|&i| &self.elements[i])
    }

    /// Elements in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &BoardElement> {
        self.elements.iter()
    }

    pub fn snakes(&self) -> impl Iterator<Item = &BoardElement> {
        self.iter().filter(|e| e.kind == ElementKind::Snake)
    }

    pub fn ladders(&self) -> impl Iterator<Item = &BoardElement> {
        self.iter().filter(|e| e.kind == ElementKind::Ladder)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[BoardElement] {
        &self.elements
    }
}

impl TryFrom<Vec<BoardElement>> for BoardElements {
    type Error = ValidationError;

    fn try_from(elements: Vec<BoardElement>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}

impl From<BoardElements> for Vec<BoardElement> {
    fn from(elements: BoardElements) -> Self {
        elements.elements
    }
}

impl<'a> IntoIterator for &'a BoardElements {
    type Item = &'a BoardElement;
    type IntoIter = std::slice::Iter<'a, BoardElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
