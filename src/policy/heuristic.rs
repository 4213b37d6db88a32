//! Hand-coded policies.
//!
//! All of them only ever ask for held ranks. With an empty hand they fall
//! back to `Rank::LOWEST`.

use serde::{Deserialize, Serialize};

use super::Policy;
use crate::core::{GameRng, Rank};
use crate::env::Observation;

/// Ask for the rank held most often; ties go to the lowest rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPolicy;

impl FrequencyPolicy {
    /// The most-held rank, if any card is held.
    #[must_use]
    pub fn best(observation: &Observation) -> Option<Rank> {
        observation
            .held_ranks()
            .fold(None, |best: Option<Rank>, rank| match best {
                Some(b) if observation.count_of_rank(b) >= observation.count_of_rank(rank) => {
                    Some(b)
                }
                _ => Some(rank),
            })
    }
}

impl Policy for FrequencyPolicy {
    fn predict(&mut self, observation: &Observation, _rng: &mut GameRng) -> Rank {
        Self::best(observation).unwrap_or(Rank::LOWEST)
    }

    fn name(&self) -> &str {
        "frequency"
    }
}

/// Ask for a uniformly random held rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// A uniformly random held rank, if any card is held.
    pub fn sample(observation: &Observation, rng: &mut GameRng) -> Option<Rank> {
        let held: Vec<Rank> = observation.held_ranks().collect();
        rng.choose(&held).copied()
    }
}

impl Policy for RandomPolicy {
    fn predict(&mut self, observation: &Observation, rng: &mut GameRng) -> Rank {
        Self::sample(observation, rng).unwrap_or(Rank::LOWEST)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Frequency policy that explores a random held rank with fixed probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExploringPolicy {
    pub explore_prob: f64,
}

impl ExploringPolicy {
    #[must_use]
    pub fn new(explore_prob: f64) -> Self {
        Self { explore_prob }
    }
}

impl Default for ExploringPolicy {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Policy for ExploringPolicy {
    fn predict(&mut self, observation: &Observation, rng: &mut GameRng) -> Rank {
        let choice = if rng.gen_bool(self.explore_prob) {
            RandomPolicy::sample(observation, rng)
        } else {
            FrequencyPolicy::best(observation)
        };
        choice.unwrap_or(Rank::LOWEST)
    }

    fn name(&self) -> &str {
        "exploring"
    }
}
