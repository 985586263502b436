//! Crate-wide error type. Browser entry points convert it into `JsValue`.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq)]
pub enum LadderError {
    NoParticipants,
    TooFewSlots { slots: usize, required: usize },
    InvalidProbability(f64),
    InvalidStepDelay(f64),
    InvalidCanvasSize { width: u32, height: u32 },
    StartOutOfRange { start: usize, participants: usize },
    RungOutOfRange { column: usize, slot: usize, columns: usize, slots: usize },
    OutcomeMismatch { participants: usize, outcomes: usize },
    GridMismatch { participants: usize, grid: usize },
    /// Malformed JSON configuration (message from the parser).
    Config(String),
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LadderError::NoParticipants => write!(f, "a ladder needs at least one participant"),
            LadderError::TooFewSlots { slots, required } => {
                write!(f, "slot count {} is too small (need at least {})", slots, required)
            }
            LadderError::InvalidProbability(p) => {
                write!(f, "rung probability {} is outside [0, 1]", p)
            }
            LadderError::InvalidStepDelay(ms) => {
                write!(f, "step delay {}ms must be positive and finite", ms)
            }
            LadderError::InvalidCanvasSize { width, height } => {
                write!(f, "canvas size {}x{} must be non-zero", width, height)
            }
            LadderError::StartOutOfRange { start, participants } => write!(
                f,
                "start column {} out of range for {} participants",
                start, participants
            ),
            LadderError::RungOutOfRange { column, slot, columns, slots } => write!(
                f,
                "rung ({}, {}) outside a {}x{} grid",
                column, slot, columns, slots
            ),
            LadderError::OutcomeMismatch { participants, outcomes } => write!(
                f,
                "{} outcomes given for {} participants",
                outcomes, participants
            ),
            LadderError::GridMismatch { participants, grid } => write!(
                f,
                "grid built for {} participants, ladder has {}",
                grid, participants
            ),
            LadderError::Config(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for LadderError {}

impl From<LadderError> for JsValue {
    fn from(err: LadderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for LadderError {
    fn from(err: serde_json::Error) -> Self {
        LadderError::Config(err.to_string())
    }
}
