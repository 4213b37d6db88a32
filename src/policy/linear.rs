//! Linear scoring policy loaded from JSON weights.
//!
//! ## File format
//!
//! ```json
//! {
//!   "encoder": "one_hot",
//!   "weights": [[...input_len floats...], ... 13 rows],
//!   "bias": [... 13 floats ...]
//! }
//! ```
//!
//! Each rank's score is `bias[r] + weights[r] · encode(observation)`; the
//! policy asks for the highest-scoring rank (lowest rank on ties).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Policy;
use crate::core::{GameRng, Rank, RANK_COUNT};
use crate::env::Observation;
use crate::nn::{EncoderKind, ObservationEncoder};

/// Errors loading linear weights.
#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("failed to read weight file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse weight JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} has wrong size: expected {expected}, got {actual}")]
    Shape {
        field: String,
        expected: usize,
        actual: usize,
    },
}

/// Serialized weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearWeights {
    #[serde(default)]
    pub encoder: EncoderKind,
    /// One row per rank.
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl LinearWeights {
    /// All-zero weights for `encoder`.
    #[must_use]
    pub fn zeros(encoder: EncoderKind) -> Self {
        Self {
            encoder,
            weights: vec![vec![0.0; encoder.input_len()]; RANK_COUNT],
            bias: vec![0.0; RANK_COUNT],
        }
    }

    /// Check every dimension against the encoder.
    pub fn validate(&self) -> Result<(), PolicyLoadError> {
        let shape_err = |field: String, expected: usize, actual: usize| {
            Err(PolicyLoadError::Shape {
                field,
                expected,
                actual,
            })
        };

        if self.weights.len() != RANK_COUNT {
            return shape_err("weights".into(), RANK_COUNT, self.weights.len());
        }
        if self.bias.len() != RANK_COUNT {
            return shape_err("bias".into(), RANK_COUNT, self.bias.len());
        }
        let input_len = self.encoder.input_len();
        for (rank, row) in self.weights.iter().enumerate() {
            if row.len() != input_len {
                return shape_err(format!("weights[{rank}]"), input_len, row.len());
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PolicyLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Argmax over per-rank linear scores.
#[derive(Clone, Debug)]
pub struct LinearPolicy {
    weights: LinearWeights,
    legal_only: bool,
}

impl LinearPolicy {
    /// Wrap validated weights.
    pub fn new(weights: LinearWeights) -> Result<Self, PolicyLoadError> {
        weights.validate()?;
        Ok(Self {
            weights,
            legal_only: false,
        })
    }

    /// Parse weights from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PolicyLoadError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load weights from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Only consider held ranks (falls back to the full argmax with an
    /// empty hand).
    #[must_use]
    pub fn with_legal_only(mut self, legal_only: bool) -> Self {
        self.legal_only = legal_only;
        self
    }

    #[must_use]
    pub fn weights(&self) -> &LinearWeights {
        &self.weights
    }

    /// Score of every rank.
    #[must_use]
    pub fn scores(&self, observation: &Observation) -> [f32; RANK_COUNT] {
        let encoded = self.weights.encoder.encode(observation);
        let mut scores = [0.0; RANK_COUNT];
        for (score, (row, bias)) in scores
            .iter_mut()
            .zip(self.weights.weights.iter().zip(&self.weights.bias))
        {
            *score = bias + encoded.dot(row);
        }
        scores
    }
}

fn argmax(candidates: impl Iterator<Item = Rank>, scores: &[f32; RANK_COUNT]) -> Option<Rank> {
    candidates.fold(None, |best: Option<Rank>, rank| match best {
        Some(b) if scores[b.index()] >= scores[rank.index()] => Some(b),
        _ => Some(rank),
    })
}

impl Policy for LinearPolicy {
    fn predict(&mut self, observation: &Observation, _rng: &mut GameRng) -> Rank {
        let scores = self.scores(observation);
        let best = if self.legal_only {
            argmax(observation.held_ranks(), &scores).or_else(|| argmax(Rank::all(), &scores))
        } else {
            argmax(Rank::all(), &scores)
        };
        best.unwrap_or(Rank::LOWEST)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
