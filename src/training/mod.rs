//! Training and evaluation infrastructure.
//!
//! ## Overview
//!
//! - **Trajectory**: one episode of agent observations, actions and rewards
//! - **ExperienceBuffer**: FIFO store that yields encoded training samples
//! - **play_episode / evaluate**: drive environments with a policy and
//!   tally wins, losses, ties, no-progress games and skipped games
//!
//! ## Usage
//!
//! ```rust
//! use go_fish::env::GoFishEnv;
//! use go_fish::policy::FrequencyPolicy;
//! use go_fish::training::{evaluate, EvalConfig};
//!
//! let config = EvalConfig::new().with_games(4).with_seed_offset(100);
//! let summary = evaluate(&config, &mut FrequencyPolicy, GoFishEnv::with_seed);
//! assert_eq!(summary.games, 4);
//! ```

pub mod evaluate;
pub mod trajectory;

pub use evaluate::{evaluate, evaluate_parallel, play_episode, EvalConfig, EvalSummary};
pub use trajectory::{ExperienceBuffer, GameOutcome, TrainingSample, Trajectory, Transition};
