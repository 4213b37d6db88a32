//! Observation encoders.
//!
//! ## OneHotEncoder (180 features)
//!
//! Every field one-hot encoded, fields in alphabetical key order:
//!
//! | Field | Width |
//! |---|---|
//! | own hand counts (13 ranks × 0..=4) | 65 |
//! | own sets | 14 |
//! | own turn | 2 |
//! | last own ask (13 = none) | 14 |
//! | last own ask success | 2 |
//! | last opponent ask (13 = none) | 14 |
//! | last opponent ask success | 2 |
//! | opponent hand size | 53 |
//! | opponent sets | 14 |
//!
//! This is the flattened layout Python-side models trained against the
//! dictionary observation space expect.
//!
//! ## CompactEncoder (21 features)
//!
//! Scaled scalars: 13 counts / 4, opponent hand size / 52, both set
//! totals / 13, own turn, and each last ask as (rank + 1) / 13 (0 for
//! none) followed by its success flag.

use serde::{Deserialize, Serialize};

use super::traits::{EncodedState, ObservationEncoder};
use crate::core::{Rank, COPIES_PER_RANK, DECK_SIZE, RANK_COUNT};
use crate::env::Observation;

const COUNT_WIDTH: usize = COPIES_PER_RANK as usize + 1;
const SETS_WIDTH: usize = RANK_COUNT + 1;
const ASK_WIDTH: usize = RANK_COUNT + 1;
const HAND_SIZE_WIDTH: usize = DECK_SIZE + 1;

/// One-hot encoder matching the flattened dictionary space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Total encoded length.
    pub const LEN: usize = RANK_COUNT * COUNT_WIDTH
        + SETS_WIDTH
        + 2
        + ASK_WIDTH
        + 2
        + ASK_WIDTH
        + 2
        + HAND_SIZE_WIDTH
        + SETS_WIDTH;
}

fn ask_slot(rank: Option<Rank>) -> usize {
    rank.map_or(RANK_COUNT, Rank::index)
}

impl ObservationEncoder for OneHotEncoder {
    fn encode(&self, obs: &Observation) -> EncodedState {
        let mut encoded = EncodedState::zeros(Self::LEN);
        let mut offset = 0;

        for &count in &obs.hand_ranks {
            encoded.set_one_hot(offset, COUNT_WIDTH, count as usize);
            offset += COUNT_WIDTH;
        }

        let slots = [
            (SETS_WIDTH, obs.own_sets as usize),
            (2, usize::from(obs.is_own_turn)),
            (ASK_WIDTH, ask_slot(obs.last_own_ask)),
            (2, usize::from(obs.last_own_ask_success)),
            (ASK_WIDTH, ask_slot(obs.last_opponent_ask)),
            (2, usize::from(obs.last_opponent_ask_success)),
            (HAND_SIZE_WIDTH, obs.opponent_hand_size as usize),
            (SETS_WIDTH, obs.opponent_sets as usize),
        ];
        for (width, value) in slots {
            encoded.set_one_hot(offset, width, value);
            offset += width;
        }

        debug_assert_eq!(offset, Self::LEN);
        encoded
    }

    fn input_len(&self) -> usize {
        Self::LEN
    }
}

/// Scaled-scalar encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactEncoder;

impl CompactEncoder {
    pub const LEN: usize = RANK_COUNT + 8;
}

impl ObservationEncoder for CompactEncoder {
    fn encode(&self, obs: &Observation) -> EncodedState {
        let ask = |rank: Option<Rank>| {
            rank.map_or(0.0, |r| (r.index() + 1) as f32 / RANK_COUNT as f32)
        };
        let flag = |b: bool| f32::from(u8::from(b));

        let mut tensor = Vec::with_capacity(Self::LEN);
        tensor.extend(
            obs.hand_ranks
                .iter()
                .map(|&c| f32::from(c) / f32::from(COPIES_PER_RANK)),
        );
        tensor.push(f32::from(obs.opponent_hand_size) / DECK_SIZE as f32);
        tensor.push(f32::from(obs.own_sets) / RANK_COUNT as f32);
        tensor.push(f32::from(obs.opponent_sets) / RANK_COUNT as f32);
        tensor.push(flag(obs.is_own_turn));
        tensor.push(ask(obs.last_own_ask));
        tensor.push(flag(obs.last_own_ask_success));
        tensor.push(ask(obs.last_opponent_ask));
        tensor.push(flag(obs.last_opponent_ask_success));

        EncodedState::new(tensor)
    }

    fn input_len(&self) -> usize {
        Self::LEN
    }
}

/// Serializable encoder selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    #[default]
    OneHot,
    Compact,
}

impl ObservationEncoder for EncoderKind {
    fn encode(&self, observation: &Observation) -> EncodedState {
        match self {
            EncoderKind::OneHot => OneHotEncoder.encode(observation),
            EncoderKind::Compact => CompactEncoder.encode(observation),
        }
    }

    fn input_len(&self) -> usize {
        match self {
            EncoderKind::OneHot => OneHotEncoder::LEN,
            EncoderKind::Compact => CompactEncoder::LEN,
        }
    }
}
