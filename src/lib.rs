//! # go-fish
//!
//! A two-player Go Fish engine packaged as a reinforcement-learning
//! environment.
//!
//! ## Design Principles
//!
//! 1. **Ranks, not cards**: suits never matter in Go Fish, so hands and the
//!    deck are rank counts. A completed set retires its rank for good.
//!
//! 2. **Explicit seats**: the learning agent and the built-in opponent are
//!    `Seat::Agent` and `Seat::Opponent`. Per-seat data lives in `SeatMap`.
//!
//! 3. **Seeded everything**: every shuffle, coin flip and opponent
//!    exploration draw comes from one `GameRng`, so a seed replays a game.
//!
//! ## Architecture
//!
//! - **Rules** operate on `GameState` and never decide rewards.
//!
//! - **Environment** wraps the rules with reset/step, the opponent cycle
//!   and reward shaping. Training and play modes share the same rules and
//!   differ only in how illegal actions and rewards are handled.
//!
//! - **Policies** map an `Observation` to a rank. The heuristic opponent,
//!   trained linear weights and Python callables all implement `Policy`.
//!
//! ## Modules
//!
//! - `core`: Ranks, seats, state, RNG, configuration, errors
//! - `cards`: Deck, hands and completed sets
//! - `rules`: Ask resolution, set detection, refills, turn flow
//! - `env`: Observations, rewards, opponent driver and `GoFishEnv`
//! - `nn`: Observation encoders for learning code
//! - `policy`: Heuristic and linear policies
//! - `training`: Episode runner, evaluation and experience buffer

pub mod core;
pub mod cards;
pub mod rules;
pub mod env;
pub mod nn;
pub mod policy;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Rank, RANK_COUNT, DECK_SIZE,
    Seat, SeatMap,
    GameRng,
    EnvConfig, EnvMode, RewardConfig, FailureMemoryConfig, ConfigError,
    GameError, IllegalReason,
    GameState, TurnState,
};

pub use crate::cards::{CompletedSets, Deck, Hand};

pub use crate::rules::{play_ask, AskOutcome, TurnReport};

pub use crate::env::{
    GoFishEnv, Observation, StepInfo, StepReason, StepResult,
    RewardShaper, TrainingReward, PlayReward,
};

pub use crate::nn::{EncodedState, EncoderKind, ObservationEncoder, OneHotEncoder};

pub use crate::policy::{ExploringPolicy, FrequencyPolicy, LinearPolicy, Policy, RandomPolicy};

pub use crate::training::{evaluate, play_episode, EvalConfig, EvalSummary, GameOutcome};
