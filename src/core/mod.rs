//! Core engine types: ranks, seats, state, RNG, configuration, errors.
//!
//! These are the building blocks every other module works with. Game
//! rules live in `crate::rules`; nothing in here enforces legality.

pub mod rank;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use rank::{Rank, COPIES_PER_RANK, DECK_SIZE, RANK_COUNT};
pub use player::{Seat, SeatMap};
pub use rng::GameRng;
pub use config::{ConfigError, EnvConfig, EnvMode, FailureMemoryConfig, RewardConfig};
pub use error::{GameError, IllegalReason};
pub use state::{AskMemory, GameState, TurnState};
