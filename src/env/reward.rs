//! Reward shaping.
//!
//! ## Components (training)
//!
//! | Component | Default |
//! |---|---|
//! | Legal decision | +0.01 |
//! | Recent failures on the same rank | −0.2 each |
//! | Opponent card captured | +0.3 each |
//! | Agent set completed | +1.0 each |
//! | Failed ask | −0.05 |
//! | Successful ask backed by a single card | −0.5 |
//! | Illegal or out-of-turn | −1.0, nothing else |
//!
//! Play mode uses a reduced schedule without the anti-repetition and
//! blind-ask terms.
//!
//! `FailureMemory` tracks the agent's failed asks by decision index so
//! the recent-failure term can look back a bounded number of turns.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{FailureMemoryConfig, IllegalReason, Rank, RewardConfig};
use crate::rules::AskOutcome;

/// Turn indices of failed asks for one rank, oldest first.
pub type FailureList = SmallVec<[u32; 10]>;

/// Recent failed asks, keyed by rank.
#[derive(Clone, Debug, Default)]
pub struct FailureMemory {
    config: FailureMemoryConfig,
    asks: FxHashMap<Rank, FailureList>,
}

impl FailureMemory {
    #[must_use]
    pub fn new(config: FailureMemoryConfig) -> Self {
        Self {
            config,
            asks: FxHashMap::default(),
        }
    }

    /// Record a failed ask for `rank` at decision `turn`.
    ///
    /// Only the most recent `max_entries` are kept.
    pub fn record(&mut self, rank: Rank, turn: u32) {
        let list = self.asks.entry(rank).or_default();
        list.push(turn);
        if list.len() > self.config.max_entries {
            let excess = list.len() - self.config.max_entries;
            list.drain(..excess);
        }
    }

    /// Failures for `rank` no more than `penalty_window` turns before `now`.
    #[must_use]
    pub fn recent_failures(&self, rank: Rank, now: u32) -> usize {
        self.asks.get(&rank).map_or(0, |list| {
            list.iter()
                .filter(|&&turn| now.saturating_sub(turn) <= self.config.penalty_window)
                .count()
        })
    }

    /// Whether decision `turn` is a pruning point.
    #[must_use]
    pub fn should_prune(&self, turn: u32) -> bool {
        turn % self.config.prune_interval.max(1) == 0
    }

    /// Drop failures older than `prune_window` turns and any emptied ranks.
    pub fn prune(&mut self, now: u32) {
        let window = self.config.prune_window;
        self.asks.retain(|_, list| {
            list.retain(|turn| now.saturating_sub(*turn) <= window);
            !list.is_empty()
        });
    }

    /// Failures on record for `rank`, oldest first.
    #[must_use]
    pub fn failures(&self, rank: Rank) -> &[u32] {
        self.asks.get(&rank).map(|list| list.as_slice()).unwrap_or(&[])
    }

    /// Number of ranks with at least one failure on record.
    #[must_use]
    pub fn tracked_ranks(&self) -> usize {
        self.asks.len()
    }

    pub fn clear(&mut self) {
        self.asks.clear();
    }
}

/// A scored agent decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    /// Rejected before resolution.
    Illegal(IllegalReason),
    /// A resolved ask.
    Ask {
        outcome: AskOutcome,
        /// Sets the asker completed during its own ask, go-fish draw included.
        /// The other seat's turn can never complete one for it.
        sets_gained: usize,
        /// Earlier failures on the same rank inside the penalty window.
        recent_failures: usize,
    },
}

/// Maps a decision to a scalar reward.
pub trait RewardShaper: Send {
    fn reward(&self, decision: &Decision) -> f64;
}

/// Full training schedule.
#[derive(Clone, Debug, Default)]
pub struct TrainingReward {
    config: RewardConfig,
}

impl TrainingReward {
    #[must_use]
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

impl RewardShaper for TrainingReward {
    fn reward(&self, decision: &Decision) -> f64 {
        let c = &self.config;
        match *decision {
            Decision::Illegal(_) => -c.illegal_action_penalty,
            Decision::Ask {
                outcome,
                sets_gained,
                recent_failures,
            } => {
                let mut reward = c.step_reward;
                reward -= c.recent_failure_penalty * recent_failures as f64;
                reward += c.card_gain * f64::from(outcome.transferred);
                reward += c.set_completion * sets_gained as f64;
                if outcome.is_success() {
                    if outcome.held_before == 1 {
                        reward -= c.blind_ask_penalty;
                    }
                } else {
                    reward -= c.failed_ask_penalty;
                }
                reward
            }
        }
    }
}

/// Interactive-play schedule.
#[derive(Clone, Debug, Default)]
pub struct PlayReward {
    config: RewardConfig,
}

impl PlayReward {
    #[must_use]
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

impl RewardShaper for PlayReward {
    fn reward(&self, decision: &Decision) -> f64 {
        let c = &self.config;
        match *decision {
            Decision::Illegal(_) => -c.play_illegal_penalty,
            Decision::Ask {
                outcome,
                sets_gained,
                ..
            } => {
                let mut reward = c.step_reward
                    + c.card_gain * f64::from(outcome.transferred)
                    + c.set_completion * sets_gained as f64;
                if !outcome.is_success() {
                    reward -= c.failed_ask_penalty;
                }
                reward
            }
        }
    }
}
