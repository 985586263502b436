//! Rung grid and its randomized generator.
//!
//! The grid has one column per adjacent pair of participants (`N - 1`) and a
//! fixed number of slots. Cell `(column, slot)` set means a rung joins
//! participant `column` with `column + 1` at that slot.

use rand::Rng;

use crate::config::{DEFAULT_RUNG_PROBABILITY, RepairPolicy};
use crate::error::LadderError;

/// One horizontal connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rung {
    pub column: usize,
    pub slot: usize,
}

/// A structural invariant a grid fails to satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Rungs at `(column - 1, slot)` and `(column, slot)` meet at one point.
    SharedEndpoint { column: usize, slot: usize },
    /// Rungs at `(column, slot - 1)` and `(column, slot)`.
    Stacked { column: usize, slot: usize },
    /// Column-pair without any rung.
    Disconnected { column: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    participants: usize,
    slots: usize,
    cells: Vec<bool>, // column-major, length = columns * slots
    rungs: Vec<Rung>, // creation order
}

impl Grid {
    pub fn empty(participants: usize, slots: usize) -> Self {
        let columns = participants.saturating_sub(1);
        Self {
            participants,
            slots,
            cells: vec![false; columns * slots],
            rungs: Vec::new(),
        }
    }

    /// Build a grid from an explicit rung list. Rungs are bounds-checked but
    /// not checked against the structural invariants; see [`Grid::violations`].
    pub fn from_rungs<I>(participants: usize, slots: usize, rungs: I) -> Result<Self, LadderError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::empty(participants, slots);
        for (column, slot) in rungs {
            if column >= grid.columns() || slot >= slots {
                return Err(LadderError::RungOutOfRange {
                    column,
                    slot,
                    columns: grid.columns(),
                    slots,
                });
            }
            grid.connect(column, slot);
        }
        Ok(grid)
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Number of adjacent column-pairs.
    pub fn columns(&self) -> usize {
        self.participants.saturating_sub(1)
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    /// True if a rung leaves `column` to the right at `slot`. Out of range is false.
    pub fn is_connected(&self, column: usize, slot: usize) -> bool {
        column < self.columns() && slot < self.slots && self.cells[self.index(column, slot)]
    }

    /// True if a rung from `column - 1` arrives at `column` at `slot`.
    pub fn connects_left(&self, column: usize, slot: usize) -> bool {
        column > 0 && self.is_connected(column - 1, slot)
    }

    pub fn rung_count(&self, column: usize) -> usize {
        (0..self.slots).filter(|&s| self.is_connected(column, s)).count()
    }

    /// Every invariant breach, in column-major order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for column in 0..self.columns() {
            if self.rung_count(column) == 0 {
                out.push(Violation::Disconnected { column });
            }
            for slot in 0..self.slots {
                if !self.is_connected(column, slot) {
                    continue;
                }
                if self.connects_left(column, slot) {
                    out.push(Violation::SharedEndpoint { column, slot });
                }
                if slot > 0 && self.is_connected(column, slot - 1) {
                    out.push(Violation::Stacked { column, slot });
                }
            }
        }
        out
    }

    fn index(&self, column: usize, slot: usize) -> usize {
        column * self.slots + slot
    }

    fn connect(&mut self, column: usize, slot: usize) {
        let idx = self.index(column, slot);
        if !self.cells[idx] {
            self.cells[idx] = true;
            self.rungs.push(Rung { column, slot });
        }
    }

    fn disconnect(&mut self, column: usize, slot: usize) {
        let idx = self.index(column, slot);
        if self.cells[idx] {
            self.cells[idx] = false;
            self.rungs.retain(|r| !(r.column == column && r.slot == slot));
        }
    }
}

/// Randomized rung generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGenerator {
    pub probability: f64,
    pub repair: RepairPolicy,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self { probability: DEFAULT_RUNG_PROBABILITY, repair: RepairPolicy::default() }
    }
}

impl GridGenerator {
    pub fn generate<R: Rng + ?Sized>(&self, participants: usize, slots: usize, rng: &mut R) -> Grid {
        let mut grid = Grid::empty(participants, slots);
        let columns = grid.columns();
        if columns == 0 || slots == 0 {
            return grid;
        }

        let probability = self.clamped_probability();
        // Slot-major so the left neighbor at the same slot is already decided.
        for slot in 0..slots {
            for column in 0..columns {
                if grid.is_connected(column, slot)
                    || grid.connects_left(column, slot)
                    || (slot > 0 && grid.is_connected(column, slot - 1))
                {
                    continue;
                }
                if rng.gen_bool(probability) {
                    grid.connect(column, slot);
                }
            }
        }

        self.repair(&mut grid);
        grid
    }

    /// Probability limited to [0, 1]; NaN never connects.
    pub fn clamped_probability(&self) -> f64 {
        if self.probability.is_nan() {
            0.0
        } else {
            self.probability.clamp(0.0, 1.0)
        }
    }

    fn repair(&self, grid: &mut Grid) {
        let last = grid.slots - 1;
        for column in 0..grid.columns() {
            if grid.rung_count(column) > 0 {
                continue;
            }
            match self.repair {
                RepairPolicy::LastSlot => grid.connect(column, last),
                RepairPolicy::Conforming => {
                    let slot = {
                        let g: &Grid = grid;
                        let left_clear = |s: usize| !g.connects_left(column, s);
                        let right_clear = |s: usize| !g.is_connected(column + 1, s);
                        (0..g.slots)
                            .rev()
                            .find(|&s| left_clear(s) && right_clear(s))
                            .or_else(|| (0..g.slots).rev().find(|&s| left_clear(s)))
                            .unwrap_or(last)
                    };
                    // An evicted right neighbor left empty is repaired on a later iteration.
                    // The left neighbor is already settled and keeps its rung; with a
                    // single slot that leaves a shared endpoint for `violations()`.
                    if grid.is_connected(column + 1, slot) {
                        grid.disconnect(column + 1, slot);
                    }
                    grid.connect(column, slot);
                }
            }
        }
    }
}

/// Generate a grid with the default probability and repair policy.
pub fn generate<R: Rng + ?Sized>(participants: usize, slots: usize, rng: &mut R) -> Grid {
    GridGenerator::default().generate(participants, slots, rng)
}
