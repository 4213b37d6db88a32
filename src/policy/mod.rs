//! Decision policies.
//!
//! A `Policy` maps an observation to the rank to ask for. The same
//! capability drives the environment's opponent, the agent in the
//! episode runner, and evaluation baselines.
//!
//! ## Implementations
//!
//! - `FrequencyPolicy`: ask for the most-held rank
//! - `RandomPolicy`: uniform over held ranks
//! - `ExploringPolicy`: frequency with random exploration (the default opponent)
//! - `LinearPolicy`: trained linear scorer loaded from JSON
//! - `FnPolicy`: any closure
//!
//! Policies may return ranks they do not hold; callers decide how to
//! treat that (the environment penalizes the agent and substitutes for
//! the opponent).

pub mod heuristic;
pub mod linear;

pub use heuristic::{ExploringPolicy, FrequencyPolicy, RandomPolicy};
pub use linear::{LinearPolicy, LinearWeights, PolicyLoadError};

use crate::core::{GameRng, Rank};
use crate::env::Observation;

/// Chooses which rank to ask for.
pub trait Policy: Send {
    /// Pick a rank given the acting seat's observation.
    fn predict(&mut self, observation: &Observation, rng: &mut GameRng) -> Rank;

    /// Short name for logs and reports.
    fn name(&self) -> &str {
        "policy"
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn predict(&mut self, observation: &Observation, rng: &mut GameRng) -> Rank {
        (**self).predict(observation, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapts a closure into a `Policy`.
///
/// ```
/// use go_fish::core::Rank;
/// use go_fish::policy::FnPolicy;
///
/// let always_lowest = FnPolicy::new(|obs: &go_fish::env::Observation| {
///     obs.held_ranks().next().unwrap_or(Rank::LOWEST)
/// });
/// # let _ = always_lowest;
/// ```
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: FnMut(&Observation) -> Rank + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&Observation) -> Rank + Send,
{
    fn predict(&mut self, observation: &Observation, _rng: &mut GameRng) -> Rank {
        (self.f)(observation)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

impl<F> std::fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_policy() {
        let mut calls = 0;
        let mut policy = FnPolicy::new(|_: &Observation| {
            calls += 1;
            Rank::new(4).unwrap()
        });
        let mut rng = GameRng::new(0);

        assert_eq!(policy.predict(&Observation::default(), &mut rng).raw(), 4);
        assert_eq!(policy.name(), "fn");
        drop(policy);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_boxed_policy() {
        let mut policy: Box<dyn Policy> = Box::new(FrequencyPolicy);
        let mut rng = GameRng::new(0);
        let mut obs = Observation::default();
        obs.hand_ranks[8] = 3;

        assert_eq!(policy.predict(&obs, &mut rng).raw(), 8);
        assert_eq!(policy.name(), "frequency");
    }
}
