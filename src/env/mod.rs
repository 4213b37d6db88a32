//! Reinforcement-learning environment.
//!
//! ## Overview
//!
//! - `GoFishEnv`: reset/step interface over one game, agent in `Seat::Agent`
//! - `Observation`: per-seat projection of the state
//! - `RewardShaper`: per-mode reward schedules (`TrainingReward`, `PlayReward`)
//! - `FailureMemory`: the agent's recent failed asks
//!
//! Each environment owns its state and RNG and is `Send`, so a worker
//! thread can own one outright.

pub mod environment;
pub mod observation;
pub mod opponent;
pub mod reward;

pub use environment::{GoFishEnv, ResetInfo, StepInfo, StepReason, StepResult};
pub use observation::{observe, Observation};
pub use opponent::{choose_opponent_rank, run_opponent_cycle};
pub use reward::{Decision, FailureMemory, PlayReward, RewardShaper, TrainingReward};
