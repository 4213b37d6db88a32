//! Environment configuration.
//!
//! - `EnvMode`: autonomous training steps or interactive play steps
//! - `RewardConfig`: weights of every reward component
//! - `FailureMemoryConfig`: windows of the anti-repetition tracker
//! - `EnvConfig`: combines all configuration
//!
//! Every struct has defaults matching the reference reward schedule, a
//! builder-style API, and serde support so configs can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rank::DECK_SIZE;

/// How `step` is driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvMode {
    /// One agent decision per step; the opponent's turn cycle is played
    /// inside the step.
    #[default]
    Train,
    /// The agent seat is a human; each step resolves a single ask for
    /// whichever seat holds the turn.
    Play,
}

/// Reward component weights.
///
/// Penalties are stored as positive magnitudes and subtracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Paid for every legal decision.
    pub step_reward: f64,
    /// Per prior failed ask on the same rank inside the penalty window.
    pub recent_failure_penalty: f64,
    /// Per opponent card captured.
    pub card_gain: f64,
    /// Per newly completed set.
    pub set_completion: f64,
    /// Once per failed ask.
    pub failed_ask_penalty: f64,
    /// Flat training-mode penalty for illegal or out-of-turn actions.
    pub illegal_action_penalty: f64,
    /// Successful ask backed by a single held card. Zero disables it.
    pub blind_ask_penalty: f64,
    /// Play-mode penalty for an illegal human ask.
    pub play_illegal_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_reward: 0.01,
            recent_failure_penalty: 0.2,
            card_gain: 0.3,
            set_completion: 1.0,
            failed_ask_penalty: 0.05,
            illegal_action_penalty: 1.0,
            blind_ask_penalty: 0.5,
            play_illegal_penalty: 0.1,
        }
    }
}

impl RewardConfig {
    /// Set the blind-ask penalty (0.0 disables it).
    #[must_use]
    pub fn with_blind_ask_penalty(mut self, penalty: f64) -> Self {
        self.blind_ask_penalty = penalty;
        self
    }

    /// Set the recent-failure penalty.
    #[must_use]
    pub fn with_recent_failure_penalty(mut self, penalty: f64) -> Self {
        self.recent_failure_penalty = penalty;
        self
    }
}

/// Windows of the recent-failed-ask tracker, measured in agent decisions.
///
/// `penalty_window` and `prune_window` are separate parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureMemoryConfig {
    /// Failures at most this many turns old count towards the penalty.
    pub penalty_window: u32,
    /// Pruning drops failures older than this many turns.
    pub prune_window: u32,
    /// Most recent failures kept per rank.
    pub max_entries: usize,
    /// Prune every this many agent decisions.
    pub prune_interval: u32,
}

impl Default for FailureMemoryConfig {
    fn default() -> Self {
        Self {
            penalty_window: 5,
            prune_window: 10,
            max_entries: 10,
            prune_interval: 5,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("hand size {hand_size} cannot be dealt to two players from one deck")]
    InvalidHandSize { hand_size: usize },

    #[error("{field} must be positive")]
    ZeroWindow { field: &'static str },
}

/// Complete environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Training or interactive play.
    pub mode: EnvMode,

    /// Cards dealt to each seat at reset.
    pub hand_size: usize,

    /// Chance the default opponent asks a random held rank instead of its
    /// most frequent one.
    pub opponent_explore_prob: f64,

    /// Reward weights.
    pub rewards: RewardConfig,

    /// Anti-repetition tracker windows.
    pub memory: FailureMemoryConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            mode: EnvMode::Train,
            hand_size: 14,
            opponent_explore_prob: 0.3,
            rewards: RewardConfig::default(),
            memory: FailureMemoryConfig::default(),
        }
    }
}

impl EnvConfig {
    /// Create a training config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step mode.
    #[must_use]
    pub fn with_mode(mut self, mode: EnvMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the default opponent's exploration probability.
    #[must_use]
    pub fn with_opponent_explore_prob(mut self, prob: f64) -> Self {
        self.opponent_explore_prob = prob;
        self
    }

    /// Set reward weights.
    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set failure memory windows.
    #[must_use]
    pub fn with_memory(mut self, memory: FailureMemoryConfig) -> Self {
        self.memory = memory;
        self
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EnvConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opponent_explore_prob) {
            return Err(ConfigError::InvalidProbability(self.opponent_explore_prob));
        }
        if self.hand_size == 0 || self.hand_size * 2 > DECK_SIZE {
            return Err(ConfigError::InvalidHandSize {
                hand_size: self.hand_size,
            });
        }
        if self.memory.prune_interval == 0 {
            return Err(ConfigError::ZeroWindow {
                field: "prune_interval",
            });
        }
        if self.memory.max_entries == 0 {
            return Err(ConfigError::ZeroWindow {
                field: "max_entries",
            });
        }
        Ok(())
    }
}
