use std::fmt;

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner,
    Loser,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Winner => "winner",
            Outcome::Loser => "loser",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome labels along the bottom of the ladder, exactly one winner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcomes {
    slots: Vec<Outcome>,
    winner: usize,
}

impl Outcomes {
    /// Draw the winning slot uniformly. `count` must be at least one.
    pub fn draw<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let winner = rng.gen_range(0..count.max(1));
        Self::with_winner(count.max(1), winner)
    }

    pub fn with_winner(count: usize, winner: usize) -> Self {
        let slots = (0..count)
            .map(|i| if i == winner { Outcome::Winner } else { Outcome::Loser })
            .collect();
        Self { slots, winner }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn winner_index(&self) -> usize {
        self.winner
    }

    pub fn get(&self, index: usize) -> Option<Outcome> {
        self.slots.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exactly_one_winner_for_any_count() {
        let mut rng = StdRng::seed_from_u64(3);
        for count in 1..40 {
            let outcomes = Outcomes::draw(count, &mut rng);
            assert_eq!(outcomes.len(), count);
            assert_eq!(outcomes.iter().filter(|o| *o == Outcome::Winner).count(), 1);
            assert_eq!(outcomes.get(outcomes.winner_index()), Some(Outcome::Winner));
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Outcome::Winner.to_string(), "winner");
        assert_eq!(Outcome::Loser.label(), "loser");
    }
}
