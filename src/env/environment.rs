//! The Go Fish environment.
//!
//! ## Lifecycle
//!
//! ```text
//! new(config, seed) ──► reset(seed?) ──► step(rank) ... ──► terminated
//!                          ▲                                  │
//!                          └──────────────────────────────────┘
//! ```
//!
//! `reset` shuffles a fresh deck, flips a coin for the first seat and
//! deals. `step` is the only mutating entry point once a game is running.
//!
//! ## Modes
//!
//! - `EnvMode::Train`: each step is one agent decision. Whenever the
//!   agent loses the turn (failed ask, illegal or out-of-turn action) the
//!   opponent's whole turn cycle is played before the step returns.
//! - `EnvMode::Play`: each step resolves exactly one ask by whichever seat
//!   holds the turn. On the opponent's turn the action argument is ignored.
//!
//! A training game in which the opponent wins the coin flip starts on the
//! opponent's turn. The first agent step is then out of turn: it is
//! penalized and the opponent plays its cycle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::observation::{observe, Observation};
use super::opponent::{choose_opponent_rank, run_opponent_cycle};
use super::reward::{Decision, FailureMemory, PlayReward, RewardShaper, TrainingReward};
use crate::cards::Deck;
use crate::core::{
    ConfigError, EnvConfig, EnvMode, GameError, GameRng, GameState, IllegalReason, Rank, Seat,
    RANK_COUNT,
};
use crate::policy::{ExploringPolicy, Policy};
use crate::rules::{check_empty_hands, deal_initial, illegal_reason, play_ask, AskOutcome};

/// Diagnostic attached to a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepReason {
    MovedOutOfTurn,
    InvalidAction,
    GameOver,
}

impl StepReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StepReason::MovedOutOfTurn => "moved_out_of_turn",
            StepReason::InvalidAction => "invalid_action",
            StepReason::GameOver => "game_over",
        }
    }
}

impl From<IllegalReason> for StepReason {
    fn from(reason: IllegalReason) -> Self {
        match reason {
            IllegalReason::OutOfTurn => StepReason::MovedOutOfTurn,
            IllegalReason::RankNotHeld => StepReason::InvalidAction,
        }
    }
}

impl std::fmt::Display for StepReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side information returned by `step`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub reason: Option<StepReason>,
    /// The agent's resolved ask, if the step made one.
    pub ask: Option<AskOutcome>,
    /// Opponent asks resolved during the step, in order.
    pub opponent_asks: Vec<AskOutcome>,
}

/// Result of `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Agent-perspective observation after the step.
    pub observation: Observation,
    pub reward: f64,
    /// All 13 sets are retired.
    pub terminated: bool,
    /// Always false here; step ceilings belong to the caller.
    pub truncated: bool,
    pub info: StepInfo,
}

/// Information returned by `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetInfo {
    /// Seed the game was dealt from.
    pub seed: u64,
    /// Seat that won the coin flip.
    pub first: Seat,
}

/// Two-player Go Fish environment with the agent in `Seat::Agent`.
pub struct GoFishEnv {
    config: EnvConfig,
    state: GameState,
    rng: GameRng,
    opponent: Box<dyn Policy>,
    shaper: Box<dyn RewardShaper>,
    failures: FailureMemory,
    turn_counter: u32,
    seed: u64,
}

impl GoFishEnv {
    /// Create an environment and deal its first game from `seed`.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Default training environment.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EnvConfig::default(), seed)
    }

    fn build(config: EnvConfig, seed: u64) -> Self {
        let shaper: Box<dyn RewardShaper> = match config.mode {
            EnvMode::Train => Box::new(TrainingReward::new(config.rewards.clone())),
            EnvMode::Play => Box::new(PlayReward::new(config.rewards.clone())),
        };

        let mut env = Self {
            opponent: Box::new(ExploringPolicy::new(config.opponent_explore_prob)),
            failures: FailureMemory::new(config.memory.clone()),
            state: GameState::new(Deck::standard(), Seat::Agent),
            rng: GameRng::new(seed),
            shaper,
            turn_counter: 0,
            seed,
            config,
        };
        env.reset(Some(seed));
        env
    }

    /// Replace the opponent policy.
    #[must_use]
    pub fn with_opponent(mut self, policy: impl Policy + 'static) -> Self {
        self.opponent = Box::new(policy);
        self
    }

    /// Replace the reward schedule.
    #[must_use]
    pub fn with_reward_shaper(mut self, shaper: impl RewardShaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    /// Inject the opponent's decision function.
    pub fn set_opponent_policy(&mut self, policy: Box<dyn Policy>) {
        self.opponent = policy;
    }

    /// Start a new game.
    ///
    /// With no seed, one is drawn from the environment's own RNG.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, ResetInfo) {
        let seed = seed.unwrap_or_else(|| self.rng.next_seed());
        self.seed = seed;
        self.rng = GameRng::new(seed);

        let deck = Deck::shuffled(&mut self.rng);
        let first = self.rng.coin_flip();
        self.start_game(deck, first)
    }

    /// Start a new game from a fixed deck and first seat.
    ///
    /// Dealing and everything after it follow the normal rules; only the
    /// shuffle and the coin flip are bypassed.
    pub fn reset_with_deck(&mut self, deck: Deck, first: Seat) -> (Observation, ResetInfo) {
        self.start_game(deck, first)
    }

    fn start_game(&mut self, deck: Deck, first: Seat) -> (Observation, ResetInfo) {
        self.state = GameState::new(deck, first);
        deal_initial(&mut self.state, first, self.config.hand_size);
        self.failures.clear();
        self.turn_counter = 0;

        debug!(seed = self.seed, first = %first, mode = ?self.config.mode, "game reset");

        (
            self.observation(),
            ResetInfo {
                seed: self.seed,
                first,
            },
        )
    }

    /// Advance the game by one action.
    pub fn step(&mut self, action: Rank) -> StepResult {
        if self.state.turn.is_terminal() {
            return self.result(
                0.0,
                StepInfo {
                    reason: Some(StepReason::GameOver),
                    ..StepInfo::default()
                },
            );
        }

        match self.config.mode {
            EnvMode::Train => self.training_step(action),
            EnvMode::Play => self.play_step(action),
        }
    }

    /// Like `step`, but validates a raw action index first.
    pub fn step_raw(&mut self, action: i64) -> Result<StepResult, GameError> {
        let rank = Rank::try_from(action)?;
        Ok(self.step(rank))
    }

    fn training_step(&mut self, action: Rank) -> StepResult {
        if let Some(reason) = illegal_reason(&self.state, Seat::Agent, action) {
            return self.forfeit_turn(action, reason);
        }

        self.turn_counter += 1;
        let now = self.turn_counter;
        let recent_failures = self.failures.recent_failures(action, now);

        let report = play_ask(&mut self.state, Seat::Agent, action);
        if !report.outcome.is_success() {
            self.failures.record(action, now);
        }
        let opponent_asks = self.play_opponent_cycle();

        let reward = self.shaper.reward(&Decision::Ask {
            outcome: report.outcome,
            sets_gained: report.sets_completed[Seat::Agent],
            recent_failures,
        });

        if self.failures.should_prune(now) {
            self.failures.prune(now);
        }

        self.result(
            reward,
            StepInfo {
                reason: None,
                ask: Some(report.outcome),
                opponent_asks,
            },
        )
    }

    /// Illegal training action: the agent loses the turn and the opponent
    /// plays its cycle.
    fn forfeit_turn(&mut self, action: Rank, reason: IllegalReason) -> StepResult {
        debug!(rank = action.raw(), %reason, "illegal agent action");

        self.state.set_turn(Seat::Opponent);
        check_empty_hands(&mut self.state);
        let opponent_asks = self.play_opponent_cycle();

        self.result(
            self.shaper.reward(&Decision::Illegal(reason)),
            StepInfo {
                reason: Some(reason.into()),
                ask: None,
                opponent_asks,
            },
        )
    }

    fn play_opponent_cycle(&mut self) -> Vec<AskOutcome> {
        let asks = run_opponent_cycle(&mut self.state, self.opponent.as_mut(), &mut self.rng);
        if self.state.has_turn(Seat::Opponent) {
            self.state.set_turn(Seat::Agent);
        }
        asks
    }

    fn play_step(&mut self, action: Rank) -> StepResult {
        if self.state.has_turn(Seat::Opponent) {
            let rank = choose_opponent_rank(&self.state, self.opponent.as_mut(), &mut self.rng);
            let report = play_ask(&mut self.state, Seat::Opponent, rank);
            return self.result(
                0.0,
                StepInfo {
                    opponent_asks: vec![report.outcome],
                    ..StepInfo::default()
                },
            );
        }

        if let Some(reason) = illegal_reason(&self.state, Seat::Agent, action) {
            debug!(rank = action.raw(), %reason, "illegal human action");
            self.state.set_turn(Seat::Opponent);
            check_empty_hands(&mut self.state);
            return self.result(
                self.shaper.reward(&Decision::Illegal(reason)),
                StepInfo {
                    reason: Some(reason.into()),
                    ..StepInfo::default()
                },
            );
        }

        let report = play_ask(&mut self.state, Seat::Agent, action);
        let reward = self.shaper.reward(&Decision::Ask {
            outcome: report.outcome,
            sets_gained: report.sets_completed[Seat::Agent],
            recent_failures: 0,
        });

        self.result(
            reward,
            StepInfo {
                ask: Some(report.outcome),
                ..StepInfo::default()
            },
        )
    }

    fn result(&self, reward: f64, info: StepInfo) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward,
            terminated: self.state.turn.is_terminal(),
            truncated: false,
            info,
        }
    }

    /// Agent-perspective observation.
    #[must_use]
    pub fn observation(&self) -> Observation {
        observe(&self.state, Seat::Agent)
    }

    /// Opponent-perspective observation.
    #[must_use]
    pub fn opponent_observation(&self) -> Observation {
        observe(&self.state, Seat::Opponent)
    }

    /// Ranks the agent may ask for now. Empty when it is not the agent's turn.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Rank> {
        if !self.state.has_turn(Seat::Agent) {
            return Vec::new();
        }
        self.state.hands[Seat::Agent].held_ranks().collect()
    }

    /// 13-entry legality mask for the agent.
    #[must_use]
    pub fn action_mask(&self) -> [bool; RANK_COUNT] {
        let mut mask = [false; RANK_COUNT];
        for rank in self.legal_actions() {
            mask[rank.index()] = true;
        }
        mask
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Legal agent decisions made this game (training mode).
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    #[must_use]
    pub fn failures(&self) -> &FailureMemory {
        &self.failures
    }

    /// Seed of the current game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.turn.is_terminal()
    }

    #[must_use]
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }
}

impl std::fmt::Debug for GoFishEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoFishEnv")
            .field("mode", &self.config.mode)
            .field("seed", &self.seed)
            .field("turn", &self.state.turn)
            .field("turn_counter", &self.turn_counter)
            .field("opponent", &self.opponent.name())
            .finish_non_exhaustive()
    }
}
