//! Path traversal from a starting column to its terminal column.
//!
//! `PathWalker` owns no reference to the grid so the animation can keep one
//! across frames; `Walk` is the borrowing iterator for one-shot use. Both run
//! the same `step` so an animated path always ends where the computed one does.

use super::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

/// The token's move at one slot: it descends to `slot` on `from`, then
/// crosses to `to` if a rung is there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub slot: usize,
    pub from: usize,
    pub to: usize,
}

impl Step {
    pub fn direction(&self) -> Direction {
        use std::cmp::Ordering;
        match self.to.cmp(&self.from) {
            Ordering::Greater => Direction::Right,
            Ordering::Less => Direction::Left,
            Ordering::Equal => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathWalker {
    start: usize,
    column: usize,
    next_slot: usize, // slot about to be processed; 0 means "above the ladder"
}

impl PathWalker {
    pub fn new(start: usize) -> Self {
        Self { start, column: start, next_slot: 0 }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Last processed slot, `None` before the first step.
    pub fn current_slot(&self) -> Option<usize> {
        self.next_slot.checked_sub(1)
    }

    pub fn is_finished(&self, grid: &Grid) -> bool {
        self.next_slot >= grid.slots()
    }

    /// Advance one slot. Returns `None` once every slot has been processed.
    pub fn step(&mut self, grid: &Grid) -> Option<Step> {
        if self.is_finished(grid) {
            return None;
        }
        let slot = self.next_slot;
        self.next_slot += 1;
        let from = self.column;
        if grid.is_connected(from, slot) {
            self.column += 1;
        } else if grid.connects_left(from, slot) {
            self.column -= 1;
        }
        Some(Step { slot, from, to: self.column })
    }
}

pub struct Walk<'a> {
    grid: &'a Grid,
    walker: PathWalker,
}

impl Walk<'_> {
    pub fn column(&self) -> usize {
        self.walker.column()
    }
}

impl Iterator for Walk<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.walker.step(self.grid)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.slots().saturating_sub(self.walker.next_slot);
        (left, Some(left))
    }
}

impl Grid {
    /// Steps taken from `start`, one per slot.
    pub fn walk(&self, start: usize) -> Walk<'_> {
        Walk { grid: self, walker: PathWalker::new(start) }
    }

    pub fn terminal_column(&self, start: usize) -> usize {
        let mut walk = self.walk(start);
        walk.by_ref().for_each(drop);
        walk.column()
    }

    /// Terminal column for every start, indexed by start column.
    pub fn result_mapping(&self) -> Vec<usize> {
        (0..self.participants()).map(|start| self.terminal_column(start)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rungs(5, 10, [(0, 2), (1, 5), (2, 0), (3, 9)]).unwrap()
    }

    #[test]
    fn traces_the_reference_ladder() {
        let grid = sample();
        assert_eq!(grid.terminal_column(0), 2);
        assert_eq!(grid.result_mapping(), vec![2, 0, 4, 1, 3]);
    }

    #[test]
    fn walk_yields_one_step_per_slot() {
        let grid = sample();
        let steps: Vec<Step> = grid.walk(0).collect();
        assert_eq!(steps.len(), 10);
        assert_eq!(steps[2], Step { slot: 2, from: 0, to: 1 });
        assert_eq!(steps[2].direction(), Direction::Right);
        assert_eq!(steps[5], Step { slot: 5, from: 1, to: 2 });
        assert!(steps.iter().filter(|s| s.direction() == Direction::Down).count() == 8);
    }

    #[test]
    fn walker_moves_left_along_incoming_rung() {
        let grid = sample();
        let mut walker = PathWalker::new(3);
        let first = walker.step(&grid).unwrap();
        assert_eq!(first, Step { slot: 0, from: 3, to: 2 });
        assert_eq!(first.direction(), Direction::Left);
        assert_eq!(walker.current_slot(), Some(0));
    }

    #[test]
    fn walker_stops_after_last_slot() {
        let grid = sample();
        let mut walker = PathWalker::new(4);
        assert_eq!(walker.current_slot(), None);
        let mut count = 0;
        while walker.step(&grid).is_some() {
            count += 1;
        }
        assert_eq!(count, 10);
        assert!(walker.is_finished(&grid));
        assert_eq!(walker.column(), 3);
        assert_eq!(walker.step(&grid), None);
    }

    #[test]
    fn single_column_maps_to_itself() {
        let grid = Grid::empty(1, 10);
        assert_eq!(grid.terminal_column(0), 0);
        assert_eq!(grid.result_mapping(), vec![0]);
    }

    #[test]
    fn right_rung_wins_on_malformed_grid() {
        let grid = Grid::from_rungs(3, 1, [(0, 0), (1, 0)]).unwrap();
        assert_eq!(grid.terminal_column(1), 2);
    }
}
