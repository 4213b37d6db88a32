//! Integration tests for policies, encoders and file-based configuration.

use std::io::Write;

use go_fish::core::{EnvConfig, EnvMode, GameRng, Rank, Seat, RANK_COUNT};
use go_fish::env::{GoFishEnv, Observation};
use go_fish::nn::{CompactEncoder, EncoderKind, ObservationEncoder, OneHotEncoder};
use go_fish::policy::{
    ExploringPolicy, FrequencyPolicy, LinearPolicy, LinearWeights, Policy, PolicyLoadError,
    RandomPolicy,
};
use tempfile::NamedTempFile;

fn rank(v: u8) -> Rank {
    Rank::new(v).unwrap()
}

fn observation_holding(counts: &[(u8, u8)]) -> Observation {
    let mut obs = Observation {
        is_own_turn: true,
        ..Observation::default()
    };
    for &(r, n) in counts {
        obs.hand_ranks[r as usize] = n;
    }
    obs
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Weights whose bias alone ranks rank 12 highest, then 11, and so on.
fn ascending_bias(encoder: EncoderKind) -> LinearWeights {
    let mut weights = LinearWeights::zeros(encoder);
    for (i, b) in weights.bias.iter_mut().enumerate() {
        *b = i as f32;
    }
    weights
}

// =============================================================================
// Heuristic Policies
// =============================================================================

#[test]
fn test_heuristics_only_ask_held_ranks() {
    let obs = observation_holding(&[(2, 1), (6, 3), (11, 2)]);
    let mut rng = GameRng::new(9);

    assert_eq!(FrequencyPolicy.predict(&obs, &mut rng), rank(6));

    let mut random = RandomPolicy;
    let mut exploring = ExploringPolicy::new(1.0);
    for _ in 0..50 {
        assert!(obs.count_of_rank(random.predict(&obs, &mut rng)) > 0);
        assert!(obs.count_of_rank(exploring.predict(&obs, &mut rng)) > 0);
    }
}

#[test]
fn test_exploring_without_exploration_is_frequency() {
    let obs = observation_holding(&[(0, 2), (4, 2), (9, 1)]);
    let mut rng = GameRng::new(1);
    let mut policy = ExploringPolicy::new(0.0);

    for _ in 0..20 {
        assert_eq!(policy.predict(&obs, &mut rng), rank(0));
    }
}

// =============================================================================
// Linear Policy
// =============================================================================

#[test]
fn test_linear_policy_from_file() {
    let weights = ascending_bias(EncoderKind::OneHot);
    let file = write_temp(&weights.to_json().unwrap());

    let mut policy = LinearPolicy::from_file(file.path()).unwrap();
    let obs = observation_holding(&[(1, 2), (3, 1)]);
    let mut rng = GameRng::new(0);

    assert_eq!(policy.weights(), &weights);
    assert_eq!(policy.predict(&obs, &mut rng), rank(12));

    let mut legal = policy.clone().with_legal_only(true);
    assert_eq!(legal.predict(&obs, &mut rng), rank(3));
}

#[test]
fn test_linear_policy_feature_weight() {
    // Reward holding exactly two copies of rank 1 (one-hot slot 1 * 5 + 2).
    let mut weights = LinearWeights::zeros(EncoderKind::OneHot);
    weights.weights[7][5 + 2] = 3.0;
    let mut policy = LinearPolicy::new(weights).unwrap();
    let mut rng = GameRng::new(0);

    let obs = observation_holding(&[(1, 2)]);
    assert!((policy.scores(&obs)[7] - 3.0).abs() < 1e-6);
    assert_eq!(policy.predict(&obs, &mut rng), rank(7));

    // Without the feature every score ties and the lowest rank wins.
    let obs = observation_holding(&[(1, 1)]);
    assert_eq!(policy.predict(&obs, &mut rng), rank(0));
}

#[test]
fn test_linear_policy_compact_weights() {
    let json = serde_json::json!({
        "encoder": "compact",
        "weights": vec![vec![0.0f32; CompactEncoder::LEN]; RANK_COUNT],
        "bias": (0..RANK_COUNT).map(|i| -(i as f32)).collect::<Vec<_>>(),
    })
    .to_string();

    let mut policy = LinearPolicy::from_json(&json).unwrap();
    assert_eq!(policy.weights().encoder, EncoderKind::Compact);
    assert_eq!(
        policy.predict(&Observation::default(), &mut GameRng::new(0)),
        rank(0)
    );
}

#[test]
fn test_linear_policy_rejects_bad_files() {
    let missing = LinearPolicy::from_file("/nonexistent/weights.json");
    assert!(matches!(missing, Err(PolicyLoadError::Io(_))));

    let garbage = write_temp("{ not json");
    assert!(matches!(
        LinearPolicy::from_file(garbage.path()),
        Err(PolicyLoadError::Json(_))
    ));

    let mut short = LinearWeights::zeros(EncoderKind::OneHot);
    short.weights[4].pop();
    let file = write_temp(&serde_json::to_string(&short).unwrap());
    match LinearPolicy::from_file(file.path()) {
        Err(err @ PolicyLoadError::Shape { .. }) => {
            assert_eq!(
                err.to_string(),
                "weights[4] has wrong size: expected 180, got 179"
            );
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn test_linear_opponent_drives_env() {
    let opponent = LinearPolicy::new(ascending_bias(EncoderKind::OneHot))
        .unwrap()
        .with_legal_only(true);
    let mut env = GoFishEnv::with_seed(5).with_opponent(opponent);
    let mut rng = GameRng::new(5);
    let mut observation = env.observation();

    for _ in 0..500 {
        let result = env.step(FrequencyPolicy.predict(&observation, &mut rng));
        observation = result.observation;
        if result.terminated {
            break;
        }
    }
    assert!(env.is_terminal());
    assert_eq!(env.opponent_name(), "linear");
}

// =============================================================================
// Encoders
// =============================================================================

#[test]
fn test_one_hot_encoding_of_live_observation() {
    let env = GoFishEnv::with_seed(17);
    let obs = env.observation();
    let encoded = OneHotEncoder.encode(&obs);

    assert_eq!(encoded.len(), 180);
    assert_eq!(encoded.shape, vec![180]);
    // One hot bit per hand rank plus one per remaining field.
    let ones = encoded.tensor.iter().filter(|&&v| v == 1.0).count();
    assert_eq!(ones, RANK_COUNT + 8);
    assert!(encoded.tensor.iter().all(|&v| v == 0.0 || v == 1.0));

    // Fresh game: no asks yet, so both last-ask slots point at "none".
    assert_eq!(encoded.tensor[81 + 13], 1.0);
    assert_eq!(encoded.tensor[97 + 13], 1.0);
    // Opponent hand size one-hot.
    let opponent_cards = env.state().hands[Seat::Opponent].len();
    assert_eq!(encoded.tensor[113 + opponent_cards], 1.0);
}

#[test]
fn test_encoder_kind_matches_concrete_encoders() {
    let obs = observation_holding(&[(0, 4), (12, 1)]);

    assert_eq!(EncoderKind::OneHot.encode(&obs), OneHotEncoder.encode(&obs));
    assert_eq!(EncoderKind::Compact.encode(&obs), CompactEncoder.encode(&obs));
    assert_eq!(EncoderKind::Compact.input_len(), 21);
    assert_eq!(EncoderKind::OneHot.action_space_size(), 13);
}

// =============================================================================
// Configuration Files
// =============================================================================

#[test]
fn test_config_from_json_file() {
    let file = write_temp(
        r#"{
            "mode": "play",
            "opponent_explore_prob": 0.0,
            "rewards": { "blind_ask_penalty": 0.0 }
        }"#,
    );
    let json = std::fs::read_to_string(file.path()).unwrap();
    let config = EnvConfig::from_json(&json).unwrap();

    assert_eq!(config.mode, EnvMode::Play);
    assert_eq!(config.hand_size, 14);
    assert_eq!(config.rewards.blind_ask_penalty, 0.0);
    assert_eq!(config.rewards.set_completion, 1.0);

    let env = GoFishEnv::new(config, 3).unwrap();
    assert_eq!(env.config().mode, EnvMode::Play);
}

#[test]
fn test_config_rejects_out_of_range() {
    assert!(EnvConfig::from_json(r#"{ "opponent_explore_prob": 2.0 }"#).is_err());
    assert!(EnvConfig::from_json(r#"{ "hand_size": 27 }"#).is_err());
    assert!(EnvConfig::from_json(r#"{ "mode": "tournament" }"#).is_err());
}
