//! Procedural snake and ladder placement.
//!
//! ## Algorithm
//!
//! 1. Ladders: start drawn from `[2, cells - 20)`, jump from `[5, min(20, cells - start - 1)]`.
//! 2. Snakes: start drawn from `[20, cells)`, jump from `[5, min(20, start - 2)]`.
//! 3. Scan ladders then snakes, keeping an element only if its start is not
//!    already a start or end of an element kept before it.
//!
//! Step 3 can drop elements. The shortfall is accepted, so callers must not
//! assume the mode's counts are met.
//!
//! ## Small boards
//!
//! When `cells - 20 <= 2` the ladder start range widens to `[2, cells - 1)`,
//! and when the available jump is shorter than 5 the jump is fixed at the
//! longest that fits. Snakes need a start of at least 20, so boards with 20 cells or
//! fewer get none.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::element::{BoardElement, BoardElements, ElementId, ElementKind};
use crate::core::{BoardSize, Cell, GameMode, RandomSource};

/// Shortest jump the generator asks for.
pub const MIN_JUMP: Cell = 5;
/// Longest jump the generator asks for.
pub const MAX_JUMP: Cell = 20;
/// Ladders start below `cells - LADDER_HEADROOM`.
pub const LADDER_HEADROOM: Cell = 20;
/// Snakes start at or above this cell.
pub const SNAKE_FLOOR: Cell = 20;

/// Generates the element set for a board.
#[derive(Clone, Copy, Debug)]
pub struct BoardElementGenerator {
    size: BoardSize,
    mode: GameMode,
}

impl BoardElementGenerator {
    #[must_use]
    pub fn new(size: BoardSize, mode: GameMode) -> Self {
        Self { size, mode }
    }

    /// Generate elements, drawing every value from `rng`.
    pub fn generate(&self, rng: &mut impl RandomSource) -> BoardElements {
        let counts = self.mode.element_counts();
        let mut candidates = Vec::with_capacity(counts.total());

        for _ in 0..counts.ladders {
            if let Some((start, end)) = self.draw_ladder(rng) {
                candidates.push((ElementKind::Ladder, start, end));
            }
        }
        for _ in 0..counts.snakes {
            if let Some((start, end)) = self.draw_snake(rng) {
                candidates.push((ElementKind::Snake, start, end));
            }
        }

        let kept = dedup_first_seen(candidates);
        trace!(
            board = %self.size,
            mode = %self.mode,
            requested = counts.total(),
            kept = kept.len(),
            "generated board elements"
        );

        let elements = kept
            .into_iter()
            .enumerate()
            .map(|(i, (kind, start, end))| BoardElement {
                id: ElementId::new(i as u16),
                kind,
                start,
                end,
            })
            .collect();

        BoardElements::from_generated(elements)
    }

    fn draw_ladder(&self, rng: &mut impl RandomSource) -> Option<(Cell, Cell)> {
        let cells = self.size.cell_count();
        let mut upper = cells.saturating_sub(LADDER_HEADROOM);
        if upper <= 2 {
            upper = cells - 1;
        }
        if upper <= 2 {
            return None;
        }
        let start = rng.gen_range_u32(2..=upper - 1);
        let max_jump = MAX_JUMP.min(cells - start - 1);
        let jump = rng.gen_range_u32(MIN_JUMP.min(max_jump)..=max_jump);
        Some((start, start + jump))
    }

    fn draw_snake(&self, rng: &mut impl RandomSource) -> Option<(Cell, Cell)> {
        let cells = self.size.cell_count();
        if cells <= SNAKE_FLOOR {
            return None;
        }
        let start = rng.gen_range_u32(SNAKE_FLOOR..=cells - 1);
        let max_jump = MAX_JUMP.min(start - 2);
        let jump = rng.gen_range_u32(MIN_JUMP..=max_jump);
        Some((start, start - jump))
    }
}

/// Keep each candidate whose start is not yet a start or end of a kept one.
fn dedup_first_seen(candidates: Vec<(ElementKind, Cell, Cell)>) -> Vec<(ElementKind, Cell, Cell)> {
    let mut used = FxHashSet::default();
    let mut kept = Vec::with_capacity(candidates.len());
    for (kind, start, end) in candidates {
        if used.contains(&start) {
            trace!(%kind, start, end, "dropped element on occupied cell");
            continue;
        }
        used.insert(start);
        used.insert(end);
        kept.push((kind, start, end));
    }
    kept
}

/// Generate elements for `size` and `mode`.
pub fn generate(size: BoardSize, mode: GameMode, rng: &mut impl RandomSource) -> BoardElements {
    BoardElementGenerator::new(size, mode).generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedSource};

    fn check_invariants(size: BoardSize, elements: &BoardElements) {
        let mut starts = FxHashSet::default();
        for e in elements {
            assert!(e.has_valid_direction(), "{:?}", e);
            assert!(e.fits(size), "{:?} on {}", e, size);
            assert!(starts.insert(e.start), "duplicate start {}", e.start);
        }
        // The unchecked index must agree with the validating constructor.
        assert_eq!(BoardElements::new(elements.as_slice().to_vec()).as_ref(), Ok(elements));
    }

    #[test]
    fn test_classic_board() {
        let mut rng = GameRng::new(42);
        let elements = generate(BoardSize::CLASSIC, GameMode::Classic, &mut rng);
        check_invariants(BoardSize::CLASSIC, &elements);
        assert!(elements.len() <= 16);
        assert!(elements.ladders().count() <= 8);
        assert!(elements.snakes().count() <= 8);
    }

    #[test]
    fn test_all_modes_and_sizes() {
        for seed in 0..50 {
            for mode in [GameMode::Classic, GameMode::Speed, GameMode::Challenge] {
                for size in [BoardSize::BEGINNER, BoardSize::CLASSIC, BoardSize::ADVANCED] {
                    let mut rng = GameRng::new(seed);
                    let elements = generate(size, mode, &mut rng);
                    check_invariants(size, &elements);
                    assert!(elements.len() <= mode.element_counts().total());
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate(BoardSize::CLASSIC, GameMode::Speed, &mut GameRng::new(5));
        let b = generate(BoardSize::CLASSIC, GameMode::Speed, &mut GameRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_sequential() {
        let elements = generate(BoardSize::CLASSIC, GameMode::Classic, &mut GameRng::new(3));
        for (i, e) in elements.iter().enumerate() {
            assert_eq!(e.id, ElementId::new(i as u16));
        }
    }

    #[test]
    fn test_scripted_ladders_and_snakes() {
        // Classic: 8 ladders then 8 snakes, two draws each.
        let mut values = Vec::new();
        for i in 0..8 {
            values.extend([10 + i * 3, 5]);
        }
        for i in 0..8 {
            values.extend([60 + i * 4, 10]);
        }
        let mut rng = ScriptedSource::new(values);
        let elements = generate(BoardSize::CLASSIC, GameMode::Classic, &mut rng);

        assert_eq!(rng.remaining(), 0);
        let first = elements.at(10).copied().unwrap();
        assert_eq!(first.kind, ElementKind::Ladder);
        assert_eq!(first.end, 15);
        let snake = elements.at(60).copied().unwrap();
        assert_eq!(snake.kind, ElementKind::Snake);
        assert_eq!(snake.end, 50);
        check_invariants(BoardSize::CLASSIC, &elements);
    }

    #[test]
    fn test_first_seen_wins() {
        // Ladder 10 -> 15, then a ladder starting on 15 (taken by an end)
        // and one starting on 10 (taken by a start). Both are dropped.
        let mut values = vec![10, 5, 15, 5, 10, 7];
        values.extend([30, 5, 40, 5, 50, 5, 60, 5, 70, 5]);
        for i in 0..8 {
            values.extend([81 + i, 5]);
        }
        let mut rng = ScriptedSource::new(values);
        let elements = generate(BoardSize::CLASSIC, GameMode::Classic, &mut rng);

        assert_eq!(elements.ladders().count(), 6);
        assert!(elements.at(15).is_none());
        assert_eq!(elements.at(10).map(|e| e.end), Some(15));
        check_invariants(BoardSize::CLASSIC, &elements);
    }

    #[test]
    fn test_snake_on_ladder_end_is_dropped() {
        let mut values = Vec::new();
        // Ladder 30 -> 50, the remaining ladders far below.
        values.extend([30, 20]);
        for i in 0..7 {
            values.extend([2 + i, 5]);
        }
        // First snake starts on 50.
        values.extend([50, 10]);
        for i in 0..7 {
            values.extend([90 + i, 5]);
        }
        let mut rng = ScriptedSource::new(values);
        let elements = generate(BoardSize::CLASSIC, GameMode::Classic, &mut rng);

        assert!(elements.at(50).is_none());
        assert_eq!(elements.snakes().count(), 7);
    }

    #[test]
    fn test_small_boards() {
        for side in 2..=5u16 {
            let size = BoardSize::new(side).unwrap();
            for seed in 0..20 {
                let elements = generate(size, GameMode::Speed, &mut GameRng::new(seed));
                check_invariants(size, &elements);
                if size.cell_count() <= SNAKE_FLOOR {
                    assert_eq!(elements.snakes().count(), 0);
                }
            }
        }
        let tiny = generate(BoardSize::new(2).unwrap(), GameMode::Classic, &mut GameRng::new(1));
        assert!(tiny.ladders().all(|e| e.start == 2 && e.end == 3));
    }
}
