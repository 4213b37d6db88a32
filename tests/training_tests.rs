//! Integration tests for episode collection and evaluation.

use go_fish::core::{EnvConfig, EnvMode, GameRng, Rank, Seat};
use go_fish::env::{GoFishEnv, Observation};
use go_fish::nn::{CompactEncoder, OneHotEncoder};
use go_fish::policy::{FnPolicy, FrequencyPolicy, RandomPolicy};
use go_fish::training::{
    evaluate, evaluate_parallel, play_episode, EvalConfig, EvalSummary, ExperienceBuffer,
    GameOutcome,
};

// =============================================================================
// Episodes
// =============================================================================

#[test]
fn test_episode_records_every_agent_step() {
    let mut env = GoFishEnv::with_seed(8);
    let trajectory = play_episode(&mut env, &mut RandomPolicy, None, 500);

    assert!(trajectory.terminated);
    assert!(!trajectory.is_empty());
    assert_eq!(trajectory.agent_sets + trajectory.opponent_sets, 13);
    assert_eq!(trajectory.seed, env.seed());
    assert_ne!(trajectory.outcome(), GameOutcome::Skipped);
    assert_ne!(trajectory.outcome(), GameOutcome::NoProgress);

    // Random asks are always legal except for the opening out-of-turn step.
    let allowed = usize::from(trajectory.first == Seat::Opponent);
    assert!(trajectory.illegal_steps() <= allowed);
}

#[test]
fn test_episode_replays_from_seed() {
    let mut a = GoFishEnv::with_seed(0);
    let mut b = GoFishEnv::with_seed(99);

    let first = play_episode(&mut a, &mut RandomPolicy, Some(1234), 500);
    let second = play_episode(&mut b, &mut RandomPolicy, Some(1234), 500);

    assert_eq!(first.transitions, second.transitions);
    assert_eq!(first.outcome(), second.outcome());
}

#[test]
fn test_always_illegal_agent_still_finishes() {
    // Asking for a rank that is never held hands every turn to the opponent.
    let mut env = GoFishEnv::with_seed(4);
    let mut stubborn = FnPolicy::new(|obs: &Observation| {
        Rank::all()
            .find(|&r| obs.count_of_rank(r) == 0)
            .unwrap_or(Rank::LOWEST)
    });
    let trajectory = play_episode(&mut env, &mut stubborn, Some(4), 500);

    assert!(trajectory.terminated);
    assert!(trajectory.illegal_steps() > 0);
    assert!(trajectory.opponent_sets > trajectory.agent_sets);
}

#[test]
fn test_episode_in_play_mode() {
    let config = EnvConfig::default().with_mode(EnvMode::Play);
    let mut env = GoFishEnv::new(config, 6).unwrap();
    let trajectory = play_episode(&mut env, &mut FrequencyPolicy, Some(6), 2_000);

    assert!(trajectory.terminated);
    assert_eq!(trajectory.agent_sets + trajectory.opponent_sets, 13);
}

// =============================================================================
// Experience Buffer
// =============================================================================

#[test]
fn test_buffer_samples_encode_observations() {
    let mut env = GoFishEnv::with_seed(2);
    let mut buffer = ExperienceBuffer::new(4);
    for seed in 0..6 {
        buffer.push(play_episode(&mut env, &mut RandomPolicy, Some(seed), 500));
    }
    assert_eq!(buffer.len(), 4);

    let total = buffer.total_steps();
    let one_hot = buffer.sample_batch(&OneHotEncoder, 0.99, 32, 7);
    assert_eq!(one_hot.len(), total.min(32));
    assert!(one_hot.iter().all(|s| s.state.len() == 180));
    assert!(one_hot.iter().all(|s| s.action < 13));

    let compact = buffer.sample_batch(&CompactEncoder, 0.99, 8, 7);
    assert!(compact.iter().all(|s| s.state.len() == 21));
}

#[test]
fn test_returns_discount_toward_the_end() {
    let mut env = GoFishEnv::with_seed(3);
    let trajectory = play_episode(&mut env, &mut FrequencyPolicy, Some(3), 500);
    let samples = trajectory.to_training_samples(&CompactEncoder, 1.0);

    let last = samples.last().unwrap();
    assert!((last.return_to_go - last.reward).abs() < 1e-6);
    let undiscounted = trajectory.total_reward() as f32;
    assert!((samples[0].return_to_go - undiscounted).abs() < 1e-3);
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_tallies_outcomes() {
    let config = EvalConfig::new().with_games(10).with_seed_offset(300);
    let summary = evaluate(&config, &mut FrequencyPolicy, GoFishEnv::with_seed);

    assert_eq!(summary.games, 10);
    assert_eq!(
        summary.wins + summary.losses + summary.ties + summary.no_progress + summary.skipped,
        10
    );
    assert_eq!(summary.skipped, 0);
    let rate = summary.win_rate().unwrap();
    assert!((0.0..=1.0).contains(&rate));
}

#[test]
fn test_evaluate_skips_games_over_the_ceiling() {
    let config = EvalConfig::new().with_games(3).with_max_steps(2);
    let summary = evaluate(&config, &mut RandomPolicy, GoFishEnv::with_seed);

    assert_eq!(summary.games, 3);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.win_rate(), None);
    assert_eq!(summary.total_steps, 6);
}

#[test]
fn test_evaluate_is_deterministic() {
    let config = EvalConfig::new().with_games(5).with_seed_offset(42);
    let first = evaluate(&config, &mut RandomPolicy, GoFishEnv::with_seed);
    let second = evaluate(&config, &mut RandomPolicy, GoFishEnv::with_seed);
    assert_eq!(first, second);
}

#[test]
fn test_parallel_evaluation_covers_every_seed() {
    let config = EvalConfig::new().with_games(9).with_seed_offset(11);
    let sequential = evaluate(&config, &mut FrequencyPolicy, GoFishEnv::with_seed);
    let parallel = evaluate_parallel(&config, 4, || FrequencyPolicy, GoFishEnv::with_seed);

    assert_eq!(parallel.games, sequential.games);
    assert_eq!(parallel.wins, sequential.wins);
    assert_eq!(parallel.losses, sequential.losses);
    assert_eq!(parallel.ties, sequential.ties);
    assert_eq!(parallel.total_steps, sequential.total_steps);
    assert!((parallel.total_reward - sequential.total_reward).abs() < 1e-6);
}

#[test]
fn test_summary_merge() {
    let mut total = EvalSummary::default();
    let part = EvalSummary {
        games: 4,
        wins: 3,
        losses: 1,
        total_steps: 80,
        ..EvalSummary::default()
    };
    total.merge(&part);
    total.merge(&part);

    assert_eq!(total.games, 8);
    assert_eq!(total.wins, 6);
    assert_eq!(total.win_rate(), Some(0.75));
}

#[test]
fn test_agent_rng_is_independent_of_env() {
    // A policy that consumes randomness must not change the deal.
    let mut env = GoFishEnv::with_seed(0);
    let mut noisy = FnPolicy::new(|obs: &Observation| {
        let mut rng = GameRng::new(obs.hand_size() as u64);
        let held: Vec<Rank> = obs.held_ranks().collect();
        rng.choose(&held).copied().unwrap_or(Rank::LOWEST)
    });
    let trajectory = play_episode(&mut env, &mut noisy, Some(77), 1);

    let mut fresh = GoFishEnv::with_seed(0);
    let (observation, _) = fresh.reset(Some(77));
    assert_eq!(trajectory.transitions[0].observation, observation);
}
