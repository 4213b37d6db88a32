//! Encoding traits and the flat tensor they produce.
//!
//! Python trainers receive `EncodedState` as a numpy array; `LinearPolicy`
//! scores it directly.

use serde::{Deserialize, Serialize};

use crate::env::Observation;

/// A flat feature vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Feature values.
    pub tensor: Vec<f32>,

    /// Always `[tensor.len()]` for the encoders in this crate.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Wrap a feature vector.
    pub fn new(tensor: Vec<f32>) -> Self {
        let shape = vec![tensor.len()];
        Self { tensor, shape }
    }

    /// All-zero vector of `len` features.
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Set the one-hot bit `value` of the slot of width `width` at `offset`.
    ///
    /// Values past the end of the slot are clamped to its last bit.
    pub(crate) fn set_one_hot(&mut self, offset: usize, width: usize, value: usize) {
        let index = offset + value.min(width - 1);
        if let Some(slot) = self.tensor.get_mut(index) {
            *slot = 1.0;
        }
    }

    /// Dot product with a weight row of the same length.
    #[must_use]
    pub fn dot(&self, weights: &[f32]) -> f32 {
        self.tensor.iter().zip(weights).map(|(x, w)| x * w).sum()
    }
}

/// Turns an observation into model input.
pub trait ObservationEncoder: Send + Sync {
    /// Encode one observation.
    fn encode(&self, observation: &Observation) -> EncodedState;

    /// Length of every encoded vector.
    fn input_len(&self) -> usize;

    /// Size of the action space (one action per rank).
    fn action_space_size(&self) -> usize {
        crate::core::RANK_COUNT
    }
}
