//! Episode runner and policy evaluation.
//!
//! `play_episode` drives one environment with an agent policy until the
//! game ends or the step ceiling is hit. `evaluate` plays many games from
//! consecutive seeds and tallies the outcomes.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::trajectory::{GameOutcome, Trajectory, Transition};
use crate::core::{GameRng, Seat};
use crate::env::GoFishEnv;
use crate::policy::Policy;

/// Configuration for evaluation runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Games to play.
    pub games: usize,

    /// Step ceiling per game; games that hit it are skipped.
    pub max_steps_per_game: usize,

    /// Game `i` is dealt from seed `seed_offset + i`.
    pub seed_offset: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            games: 1000,
            max_steps_per_game: 500,
            seed_offset: 0,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps_per_game = max;
        self
    }

    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Seed of game `index`.
    #[must_use]
    pub fn game_seed(&self, index: usize) -> u64 {
        self.seed_offset.wrapping_add(index as u64)
    }
}

/// Outcome tallies over an evaluation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub no_progress: usize,
    pub skipped: usize,
    /// Agent steps over every game, skipped ones included.
    pub total_steps: usize,
    pub illegal_steps: usize,
    pub total_reward: f64,
}

impl EvalSummary {
    /// Fold one episode into the tallies.
    pub fn record(&mut self, trajectory: &Trajectory) {
        self.games += 1;
        self.total_steps += trajectory.len();
        self.illegal_steps += trajectory.illegal_steps();
        self.total_reward += trajectory.total_reward();
        match trajectory.outcome() {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Tie => self.ties += 1,
            GameOutcome::NoProgress => self.no_progress += 1,
            GameOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Combine tallies from another run.
    pub fn merge(&mut self, other: &EvalSummary) {
        self.games += other.games;
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
        self.no_progress += other.no_progress;
        self.skipped += other.skipped;
        self.total_steps += other.total_steps;
        self.illegal_steps += other.illegal_steps;
        self.total_reward += other.total_reward;
    }

    /// Games that finished within the ceiling.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.games - self.skipped
    }

    /// Wins over completed games; `None` if every game was skipped.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        match self.completed() {
            0 => None,
            n => Some(self.wins as f64 / n as f64),
        }
    }
}

/// Play one episode with `agent` in the agent seat.
///
/// `seed` is passed to `reset`. The agent's own randomness is derived
/// from the game seed, so an episode is reproducible from it.
pub fn play_episode(
    env: &mut GoFishEnv,
    agent: &mut dyn Policy,
    seed: Option<u64>,
    max_steps: usize,
) -> Trajectory {
    let (mut observation, reset) = env.reset(seed);
    let mut agent_rng = GameRng::new(reset.seed).fork();
    let mut trajectory = Trajectory::new(reset.seed, reset.first);

    while trajectory.len() < max_steps {
        let action = agent.predict(&observation, &mut agent_rng);
        let result = env.step(action);

        trajectory.push(Transition {
            observation,
            action,
            reward: result.reward,
            reason: result.info.reason,
        });
        observation = result.observation;

        if result.terminated {
            trajectory.terminated = true;
            break;
        }
    }

    let state = env.state();
    trajectory.truncated = !trajectory.terminated;
    trajectory.agent_sets = state.sets[Seat::Agent].total();
    trajectory.opponent_sets = state.sets[Seat::Opponent].total();
    trajectory
}

/// Play `config.games` episodes and tally the results.
///
/// `env_factory` builds the environment for each game seed.
pub fn evaluate(
    config: &EvalConfig,
    agent: &mut dyn Policy,
    mut env_factory: impl FnMut(u64) -> GoFishEnv,
) -> EvalSummary {
    let mut summary = EvalSummary::default();

    for index in 0..config.games {
        let seed = config.game_seed(index);
        let mut env = env_factory(seed);
        let trajectory = play_episode(&mut env, agent, Some(seed), config.max_steps_per_game);

        debug!(
            game = index + 1,
            seed,
            outcome = %trajectory.outcome(),
            agent_sets = trajectory.agent_sets,
            opponent_sets = trajectory.opponent_sets,
            steps = trajectory.len(),
            "game finished"
        );
        summary.record(&trajectory);
    }

    info!(
        agent = agent.name(),
        games = summary.games,
        wins = summary.wins,
        losses = summary.losses,
        ties = summary.ties,
        no_progress = summary.no_progress,
        skipped = summary.skipped,
        win_rate = ?summary.win_rate(),
        "evaluation complete"
    );
    summary
}

/// Play `config.games` episodes on a pool of `workers` threads.
///
/// Every game gets a fresh environment from `env_factory`; agents are
/// built per rayon split by `agent_factory`. A panic in any game is
/// re-raised here. Tallies equal those of `evaluate` on the same seeds.
pub fn evaluate_parallel<P, F, E>(
    config: &EvalConfig,
    workers: usize,
    agent_factory: F,
    env_factory: E,
) -> EvalSummary
where
    P: Policy,
    F: Fn() -> P + Sync + Send,
    E: Fn(u64) -> GoFishEnv + Sync + Send,
{
    let run = || {
        (0..config.games)
            .into_par_iter()
            .map_init(&agent_factory, |agent, index| {
                let seed = config.game_seed(index);
                let mut env = env_factory(seed);
                let trajectory =
                    play_episode(&mut env, agent, Some(seed), config.max_steps_per_game);
                debug!(
                    game = index + 1,
                    seed,
                    outcome = %trajectory.outcome(),
                    steps = trajectory.len(),
                    "game finished"
                );
                trajectory
            })
            .fold(EvalSummary::default, |mut summary, trajectory| {
                summary.record(&trajectory);
                summary
            })
            .reduce(EvalSummary::default, |mut acc, part| {
                acc.merge(&part);
                acc
            })
    };

    let summary = match ThreadPoolBuilder::new().num_threads(workers.max(1)).build() {
        Ok(pool) => pool.install(run),
        Err(error) => {
            warn!(%error, "falling back to the global rayon pool");
            run()
        }
    };

    info!(
        workers,
        games = summary.games,
        wins = summary.wins,
        losses = summary.losses,
        skipped = summary.skipped,
        win_rate = ?summary.win_rate(),
        "parallel evaluation complete"
    );
    summary
}
