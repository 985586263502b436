//! Ladder model: participants across the top, outcomes along the bottom and
//! the rung grid between them. Built once per game and never mutated.

use rand::Rng;

use crate::config::LadderConfig;
use crate::error::LadderError;

pub mod grid;
pub mod outcome;
pub mod walker;

pub use grid::{Grid, GridGenerator, Rung, Violation, generate};
pub use outcome::{Outcome, Outcomes};
pub use walker::{Direction, PathWalker, Step, Walk};

#[derive(Clone, Debug)]
pub struct Ladder {
    participants: Vec<String>,
    outcomes: Outcomes,
    grid: Grid,
}

impl Ladder {
    /// Draw the winning slot, then the rungs, from one random source.
    pub fn generate<R: Rng + ?Sized>(config: &LadderConfig, rng: &mut R) -> Result<Self, LadderError> {
        config.validate()?;
        let count = config.participants.len();
        let outcomes = Outcomes::draw(count, rng);
        let generator = GridGenerator {
            probability: config.rung_probability,
            repair: config.repair,
        };
        let grid = generator.generate(count, config.slot_count, rng);
        Self::from_parts(config.participants.clone(), outcomes, grid)
    }

    pub fn from_parts(
        participants: Vec<String>,
        outcomes: Outcomes,
        grid: Grid,
    ) -> Result<Self, LadderError> {
        if participants.is_empty() {
            return Err(LadderError::NoParticipants);
        }
        if outcomes.len() != participants.len() {
            return Err(LadderError::OutcomeMismatch {
                participants: participants.len(),
                outcomes: outcomes.len(),
            });
        }
        if grid.participants() != participants.len() {
            return Err(LadderError::GridMismatch {
                participants: participants.len(),
                grid: grid.participants(),
            });
        }
        Ok(Self { participants, outcomes, grid })
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn check_start(&self, start: usize) -> Result<(), LadderError> {
        if start < self.len() {
            Ok(())
        } else {
            Err(LadderError::StartOutOfRange { start, participants: self.len() })
        }
    }

    pub fn terminal_column(&self, start: usize) -> Result<usize, LadderError> {
        self.check_start(start)?;
        Ok(self.grid.terminal_column(start))
    }

    pub fn outcome_for(&self, start: usize) -> Result<Outcome, LadderError> {
        let end = self.terminal_column(start)?;
        self.outcomes
            .get(end)
            .ok_or(LadderError::StartOutOfRange { start: end, participants: self.len() })
    }

    pub fn result_mapping(&self) -> Vec<usize> {
        self.grid.result_mapping()
    }

    /// Participant whose path ends on the winning slot.
    pub fn winning_participant(&self) -> usize {
        let winner = self.outcomes.winner_index();
        self.result_mapping()
            .iter()
            .position(|&end| end == winner)
            .unwrap_or(winner)
    }
}
