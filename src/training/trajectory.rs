//! Trajectories and experience buffer for training data collection.
//!
//! A trajectory records one episode from the agent's seat:
//! - The observation before each step
//! - The rank asked for and the reward received
//! - How the episode ended and the final set counts

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Rank, Seat};
use crate::env::{Observation, StepReason};
use crate::nn::{EncodedState, ObservationEncoder};

/// One agent step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Agent observation the action was chosen from.
    pub observation: Observation,
    pub action: Rank,
    pub reward: f64,
    /// Step diagnostic, if any.
    pub reason: Option<StepReason>,
}

/// How an episode ended for the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Win,
    Loss,
    Tie,
    /// Finished with neither seat completing a set.
    NoProgress,
    /// Hit the step ceiling before finishing.
    Skipped,
}

impl GameOutcome {
    /// Classify a finished or truncated episode.
    #[must_use]
    pub fn classify(agent_sets: usize, opponent_sets: usize, truncated: bool) -> Self {
        if truncated {
            GameOutcome::Skipped
        } else if agent_sets == 0 && opponent_sets == 0 {
            GameOutcome::NoProgress
        } else if agent_sets > opponent_sets {
            GameOutcome::Win
        } else if agent_sets < opponent_sets {
            GameOutcome::Loss
        } else {
            GameOutcome::Tie
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameOutcome::Win => "WIN",
            GameOutcome::Loss => "LOSS",
            GameOutcome::Tie => "TIE",
            GameOutcome::NoProgress => "NO PROGRESS",
            GameOutcome::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete episode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory {
    pub transitions: Vec<Transition>,

    /// Seed the game was dealt from.
    pub seed: u64,

    /// Coin-flip winner.
    pub first: Seat,

    pub terminated: bool,
    pub truncated: bool,

    /// Final set totals.
    pub agent_sets: usize,
    pub opponent_sets: usize,
}

impl Trajectory {
    pub fn new(seed: u64, first: Seat) -> Self {
        Self {
            transitions: Vec::new(),
            seed,
            first,
            terminated: false,
            truncated: false,
            agent_sets: 0,
            opponent_sets: 0,
        }
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of rewards.
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Steps rejected as illegal or out of turn.
    #[must_use]
    pub fn illegal_steps(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| {
                matches!(
                    t.reason,
                    Some(StepReason::InvalidAction | StepReason::MovedOutOfTurn)
                )
            })
            .count()
    }

    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome::classify(self.agent_sets, self.opponent_sets, self.truncated)
    }

    /// Convert to training samples with discounted returns.
    pub fn to_training_samples(
        &self,
        encoder: &dyn ObservationEncoder,
        gamma: f64,
    ) -> Vec<TrainingSample> {
        let mut running = 0.0;
        let mut returns = vec![0.0; self.transitions.len()];
        for (i, transition) in self.transitions.iter().enumerate().rev() {
            running = transition.reward + gamma * running;
            returns[i] = running;
        }

        self.transitions
            .iter()
            .zip(returns)
            .map(|(t, ret)| TrainingSample {
                state: encoder.encode(&t.observation),
                action: t.action.raw(),
                reward: t.reward as f32,
                return_to_go: ret as f32,
            })
            .collect()
    }
}

/// A single training sample extracted from a trajectory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingSample {
    pub state: EncodedState,
    pub action: u8,
    pub reward: f32,
    /// Discounted return from this step on.
    pub return_to_go: f32,
}

/// FIFO buffer of trajectories.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    trajectories: VecDeque<Trajectory>,
    max_trajectories: usize,
}

impl ExperienceBuffer {
    pub fn new(max_trajectories: usize) -> Self {
        Self {
            trajectories: VecDeque::with_capacity(max_trajectories),
            max_trajectories,
        }
    }

    /// Add a trajectory, evicting the oldest when full.
    pub fn push(&mut self, trajectory: Trajectory) {
        if self.trajectories.len() >= self.max_trajectories {
            self.trajectories.pop_front();
        }
        self.trajectories.push_back(trajectory);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    /// Transitions across all trajectories.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    /// Sample `batch_size` training samples without replacement.
    pub fn sample_batch(
        &self,
        encoder: &dyn ObservationEncoder,
        gamma: f64,
        batch_size: usize,
        seed: u64,
    ) -> Vec<TrainingSample> {
        let mut samples: Vec<TrainingSample> = self
            .trajectories
            .iter()
            .flat_map(|t| t.to_training_samples(encoder, gamma))
            .collect();

        let mut rng = GameRng::new(seed);
        rng.shuffle(&mut samples);
        samples.truncate(batch_size);
        samples
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}
