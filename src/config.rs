//! Game configuration. Every field has a default so a JSON document only needs
//! to name what it overrides.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LadderError;

pub const DEFAULT_SLOT_COUNT: usize = 10;
pub const DEFAULT_RUNG_PROBABILITY: f64 = 0.5;
pub const DEFAULT_STEP_DELAY_MS: f64 = 200.0;
pub const DEFAULT_CANVAS_ID: &str = "ladderCanvas";

pub const DEFAULT_PARTICIPANTS: &[&str] = &[
    "0xafc...3a1",
    "0xfbb...faa",
    "0xcfb...fba",
    "0xaa3...cfa",
    "0x7ab...fba",
];

/// How the generator fills a column-pair the random pass left without rungs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RepairPolicy {
    /// Latest slot that keeps both neighbors clear, evicting a right-hand
    /// neighbor's rung only when no clear slot exists.
    #[default]
    Conforming,
    /// Always the last slot, even when a neighbor already has a rung there.
    LastSlot,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LadderConfig {
    pub participants: Vec<String>,
    pub slot_count: usize,
    pub rung_probability: f64,
    pub repair: RepairPolicy,
    pub step_delay_ms: f64,
    pub canvas_id: String,
    /// Size used only when the canvas has to be created.
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub seed: Option<u64>,
    /// Session identifier from the page (`?game=`); informational.
    pub game_id: Option<String>,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            participants: DEFAULT_PARTICIPANTS.iter().map(|p| p.to_string()).collect(),
            slot_count: DEFAULT_SLOT_COUNT,
            rung_probability: DEFAULT_RUNG_PROBABILITY,
            repair: RepairPolicy::default(),
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            canvas_width: 600,
            canvas_height: 500,
            seed: None,
            game_id: None,
        }
    }
}

impl LadderConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, LadderError> {
        let config: LadderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Smallest slot count the repair pass can satisfy for this participant count.
    pub fn min_slot_count(&self) -> usize {
        match self.repair {
            RepairPolicy::Conforming if self.participants.len() >= 3 => 2,
            _ => 1,
        }
    }

    pub fn validate(&self) -> Result<(), LadderError> {
        if self.participants.is_empty() {
            return Err(LadderError::NoParticipants);
        }
        let required = self.min_slot_count();
        if self.slot_count < required {
            return Err(LadderError::TooFewSlots { slots: self.slot_count, required });
        }
        if !(0.0..=1.0).contains(&self.rung_probability) {
            return Err(LadderError::InvalidProbability(self.rung_probability));
        }
        if !self.step_delay_ms.is_finite() || self.step_delay_ms <= 0.0 {
            return Err(LadderError::InvalidStepDelay(self.step_delay_ms));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(LadderError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(())
    }

    /// Apply `game` and `seed` from a page query string (`?game=..&seed=..`).
    /// Unparseable seeds are ignored.
    pub fn apply_query(&mut self, game: Option<String>, seed: Option<&str>) {
        if let Some(id) = game.filter(|g| !g.is_empty()) {
            self.game_id = Some(id);
        }
        if let Some(seed) = seed.and_then(|s| s.trim().parse::<u64>().ok()) {
            self.seed = Some(seed);
        }
    }
}
