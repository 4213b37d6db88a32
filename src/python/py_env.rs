//! Gymnasium-style environment binding.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::py_policy::{load_linear, parse_encoder, PyCallablePolicy};
use crate::core::{EnvConfig, EnvMode, Seat};
use crate::env::{GoFishEnv, Observation, StepResult};
use crate::nn::{EncoderKind, ObservationEncoder};
use crate::policy::ExploringPolicy;

/// Python wrapper for GoFishEnv.
///
/// Observations are returned as flat float32 numpy arrays produced by the
/// configured encoder (180 one-hot features by default).
#[pyclass(name = "GoFishEnv")]
pub struct PyGoFishEnv {
    env: GoFishEnv,
    encoder: EncoderKind,
}

fn value_err(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

impl PyGoFishEnv {
    fn encode<'py>(&self, py: Python<'py>, observation: &Observation) -> Bound<'py, PyArray1<f32>> {
        let encoded = self.encoder.encode(observation);
        PyArray1::from_slice_bound(py, &encoded.tensor)
    }

    fn step_info<'py>(&self, py: Python<'py>, result: &StepResult) -> PyResult<Bound<'py, PyDict>> {
        let info = PyDict::new_bound(py);
        if let Some(reason) = result.info.reason {
            info.set_item("reason", reason.as_str())?;
        }
        if let Some(ask) = result.info.ask {
            info.set_item("ask_success", ask.is_success())?;
            info.set_item("cards_received", ask.transferred)?;
        }
        let opponent_asks: Vec<(u8, bool)> = result
            .info
            .opponent_asks
            .iter()
            .map(|ask| (ask.rank.raw(), ask.is_success()))
            .collect();
        info.set_item("opponent_asks", opponent_asks)?;
        info.set_item("action_mask", self.env.action_mask().to_vec())?;
        Ok(info)
    }
}

#[pymethods]
impl PyGoFishEnv {
    /// Create an environment.
    ///
    /// `config_json`, when given, replaces every other configuration argument.
    #[new]
    #[pyo3(signature = (mode = "train", seed = 0, encoder = "one_hot", opponent_explore_prob = 0.3, config_json = None))]
    fn new(
        mode: &str,
        seed: u64,
        encoder: &str,
        opponent_explore_prob: f64,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EnvConfig::from_json(json).map_err(value_err)?,
            None => {
                let mode = match mode {
                    "train" => EnvMode::Train,
                    "play" => EnvMode::Play,
                    other => {
                        return Err(PyValueError::new_err(format!(
                            "unknown mode '{other}', expected 'train' or 'play'"
                        )))
                    }
                };
                EnvConfig::new()
                    .with_mode(mode)
                    .with_opponent_explore_prob(opponent_explore_prob)
            }
        };

        Ok(Self {
            env: GoFishEnv::new(config, seed).map_err(value_err)?,
            encoder: parse_encoder(encoder)?,
        })
    }

    /// Start a new game. Returns `(observation, info)`.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, Bound<'py, PyDict>)> {
        let (observation, reset) = self.env.reset(seed);
        let info = PyDict::new_bound(py);
        info.set_item("seed", reset.seed)?;
        info.set_item("agent_first", reset.first == Seat::Agent)?;
        info.set_item("action_mask", self.env.action_mask().to_vec())?;
        Ok((self.encode(py, &observation), info))
    }

    /// Ask for `action`. Returns `(observation, reward, terminated, truncated, info)`.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: i64,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f64, bool, bool, Bound<'py, PyDict>)> {
        let result = self.env.step_raw(action).map_err(value_err)?;
        let info = self.step_info(py, &result)?;
        Ok((
            self.encode(py, &result.observation),
            result.reward,
            result.terminated,
            result.truncated,
            info,
        ))
    }

    /// Drive the opponent with a Python callable `f(observation) -> int`.
    ///
    /// The callable receives the opponent's encoded observation.
    fn set_opponent_policy(&mut self, callback: PyObject) {
        self.env
            .set_opponent_policy(Box::new(PyCallablePolicy::new(callback, self.encoder)));
    }

    /// Drive the opponent with linear weights loaded from a JSON file.
    fn set_opponent_linear(&mut self, path: &str) -> PyResult<()> {
        let policy = load_linear(path)?.with_legal_only(true);
        self.env.set_opponent_policy(Box::new(policy));
        Ok(())
    }

    /// Restore the built-in exploring frequency opponent.
    fn set_opponent_heuristic(&mut self, explore_prob: f64) {
        self.env
            .set_opponent_policy(Box::new(ExploringPolicy::new(explore_prob)));
    }

    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        self.encode(py, &self.env.observation())
    }

    fn opponent_observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        self.encode(py, &self.env.opponent_observation())
    }

    fn legal_actions(&self) -> Vec<u8> {
        self.env.legal_actions().iter().map(|r| r.raw()).collect()
    }

    fn action_mask(&self) -> Vec<bool> {
        self.env.action_mask().to_vec()
    }

    /// Agent's per-rank hand counts.
    fn agent_hand(&self) -> Vec<u8> {
        self.env.state().hands[Seat::Agent].counts().to_vec()
    }

    /// `(agent_sets, opponent_sets)`.
    fn sets(&self) -> (usize, usize) {
        let state = self.env.state();
        (
            state.sets[Seat::Agent].total(),
            state.sets[Seat::Opponent].total(),
        )
    }

    #[getter]
    fn deck_size(&self) -> usize {
        self.env.state().deck.len()
    }

    #[getter]
    fn is_agent_turn(&self) -> bool {
        self.env.state().has_turn(Seat::Agent)
    }

    #[getter]
    fn observation_size(&self) -> usize {
        self.encoder.input_len()
    }

    #[getter]
    fn action_size(&self) -> usize {
        self.encoder.action_space_size()
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.env)
    }
}
