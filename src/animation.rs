//! Token animation as an explicit state machine.
//!
//! The animator is ticked with a millisecond clock (`performance.now()` in the
//! browser). It takes one walker step on the first tick after a start and one
//! per `step_delay_ms` afterwards, then finishes one delay after the last
//! slot. Each start returns a token; starting again supersedes the previous
//! animation and its token stops being valid.

use crate::ladder::{Grid, PathWalker, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationToken(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Animating {
        walker: PathWalker,
        trail: Vec<Step>,
        next_step_at: f64,
    },
    Done {
        start: usize,
        terminal: usize,
        trail: Vec<Step>,
    },
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Waiting,
    Stepped(Step),
    Finished { start: usize, terminal: usize },
}

impl Tick {
    /// Whether the drawing is out of date after this tick.
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Tick::Stepped(_) | Tick::Finished { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Animator {
    phase: Phase,
    step_delay_ms: f64,
    generation: u64,
}

impl Animator {
    pub fn new(step_delay_ms: f64) -> Self {
        Self { phase: Phase::Idle, step_delay_ms, generation: 0 }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    /// Steps taken so far by the current or finished animation.
    pub fn trail(&self) -> &[Step] {
        match &self.phase {
            Phase::Idle => &[],
            Phase::Animating { trail, .. } | Phase::Done { trail, .. } => trail,
        }
    }

    /// Start column of the current or finished animation.
    pub fn start_column(&self) -> Option<usize> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Animating { walker, .. } => Some(walker.start()),
            Phase::Done { start, .. } => Some(*start),
        }
    }

    /// Column the token is on right now.
    pub fn current_column(&self) -> Option<usize> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Animating { walker, .. } => Some(walker.column()),
            Phase::Done { terminal, .. } => Some(*terminal),
        }
    }

    pub fn current_slot(&self) -> Option<usize> {
        match &self.phase {
            Phase::Animating { walker, .. } => walker.current_slot(),
            _ => None,
        }
    }

    /// Begin animating from `start`, replacing whatever was running.
    pub fn start(&mut self, start: usize, now: f64) -> AnimationToken {
        self.generation += 1;
        self.phase = Phase::Animating {
            walker: PathWalker::new(start),
            trail: Vec::new(),
            next_step_at: now,
        };
        AnimationToken(self.generation)
    }

    pub fn is_current(&self, token: AnimationToken) -> bool {
        token.0 == self.generation
    }

    /// Stop the animation `token` refers to. Stale tokens and finished
    /// animations are left alone.
    pub fn cancel(&mut self, token: AnimationToken) -> bool {
        if self.is_current(token) && self.is_animating() {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Stop whatever is animating.
    pub fn cancel_current(&mut self) -> bool {
        self.cancel(AnimationToken(self.generation))
    }

    pub fn tick(&mut self, grid: &Grid, now: f64) -> Tick {
        let delay = self.step_delay_ms;
        let Phase::Animating { walker, trail, next_step_at } = &mut self.phase else {
            return Tick::Idle;
        };
        if now < *next_step_at {
            return Tick::Waiting;
        }
        *next_step_at = now + delay;
        if let Some(step) = walker.step(grid) {
            trail.push(step);
            return Tick::Stepped(step);
        }
        let start = walker.start();
        let terminal = walker.column();
        let trail = std::mem::take(trail);
        self.phase = Phase::Done { start, terminal, trail };
        Tick::Finished { start, terminal }
    }
}
