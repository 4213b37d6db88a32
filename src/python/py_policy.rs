//! Python-callable policies and evaluation entry points.

use numpy::PyArray1;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use tracing::warn;

use crate::core::{GameRng, Rank};
use crate::env::{GoFishEnv, Observation};
use crate::nn::{EncoderKind, ObservationEncoder};
use crate::policy::{LinearPolicy, Policy, PolicyLoadError};
use crate::training::{evaluate, EvalConfig, EvalSummary};

/// A Python callable used as a `Policy`.
///
/// The callable receives the encoded observation as a 1-D float32 numpy
/// array and returns a rank index. Exceptions and non-integer results
/// fall back to `Rank::LOWEST`.
pub struct PyCallablePolicy {
    callback: PyObject,
    encoder: EncoderKind,
}

impl PyCallablePolicy {
    pub fn new(callback: PyObject, encoder: EncoderKind) -> Self {
        Self { callback, encoder }
    }

    fn call(&self, py: Python<'_>, observation: &Observation) -> PyResult<i64> {
        let encoded = self.encoder.encode(observation);
        let array = PyArray1::from_slice_bound(py, &encoded.tensor);
        self.callback.call1(py, (array,))?.extract(py)
    }
}

impl Policy for PyCallablePolicy {
    fn predict(&mut self, observation: &Observation, _rng: &mut GameRng) -> Rank {
        let raw = Python::with_gil(|py| self.call(py, observation));
        match raw {
            Ok(value) => Rank::try_from(value).unwrap_or_else(|err| {
                warn!(%err, "python policy returned an out-of-range rank");
                Rank::LOWEST
            }),
            Err(err) => {
                warn!(%err, "python policy call failed");
                Rank::LOWEST
            }
        }
    }

    fn name(&self) -> &str {
        "python"
    }
}

pub(crate) fn parse_encoder(name: &str) -> PyResult<EncoderKind> {
    match name {
        "one_hot" => Ok(EncoderKind::OneHot),
        "compact" => Ok(EncoderKind::Compact),
        other => Err(PyValueError::new_err(format!(
            "unknown encoder '{other}', expected 'one_hot' or 'compact'"
        ))),
    }
}

pub(crate) fn load_linear(path: &str) -> PyResult<LinearPolicy> {
    LinearPolicy::from_file(path).map_err(|err| match err {
        PolicyLoadError::Io(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    })
}

/// Python wrapper for EvalSummary.
#[pyclass(name = "EvalSummary")]
#[derive(Clone)]
pub struct PyEvalSummary(pub EvalSummary);

#[pymethods]
impl PyEvalSummary {
    #[getter]
    fn games(&self) -> usize {
        self.0.games
    }

    #[getter]
    fn wins(&self) -> usize {
        self.0.wins
    }

    #[getter]
    fn losses(&self) -> usize {
        self.0.losses
    }

    #[getter]
    fn ties(&self) -> usize {
        self.0.ties
    }

    #[getter]
    fn no_progress(&self) -> usize {
        self.0.no_progress
    }

    #[getter]
    fn skipped(&self) -> usize {
        self.0.skipped
    }

    #[getter]
    fn illegal_steps(&self) -> usize {
        self.0.illegal_steps
    }

    /// Wins over completed games, or None if every game was skipped.
    #[getter]
    fn win_rate(&self) -> Option<f64> {
        self.0.win_rate()
    }

    fn __repr__(&self) -> String {
        format!(
            "EvalSummary(games={}, wins={}, losses={}, ties={}, no_progress={}, skipped={})",
            self.0.games, self.0.wins, self.0.losses, self.0.ties, self.0.no_progress, self.0.skipped
        )
    }
}

fn run_evaluation(
    py: Python<'_>,
    agent: &mut dyn Policy,
    games: usize,
    max_steps: usize,
    seed_offset: u64,
) -> PyEvalSummary {
    let config = EvalConfig::new()
        .with_games(games)
        .with_max_steps(max_steps)
        .with_seed_offset(seed_offset);
    let summary = py.allow_threads(|| evaluate(&config, agent, GoFishEnv::with_seed));
    PyEvalSummary(summary)
}

/// Evaluate a Python callable against the default opponent.
#[pyfunction]
#[pyo3(signature = (callback, games = 1000, max_steps = 500, seed_offset = 0, encoder = "one_hot"))]
pub fn evaluate_callable(
    py: Python<'_>,
    callback: PyObject,
    games: usize,
    max_steps: usize,
    seed_offset: u64,
    encoder: &str,
) -> PyResult<PyEvalSummary> {
    let mut agent = PyCallablePolicy::new(callback, parse_encoder(encoder)?);
    Ok(run_evaluation(py, &mut agent, games, max_steps, seed_offset))
}

/// Evaluate linear weights stored at `path` against the default opponent.
#[pyfunction]
#[pyo3(signature = (path, games = 1000, max_steps = 500, seed_offset = 0))]
pub fn evaluate_linear(
    py: Python<'_>,
    path: &str,
    games: usize,
    max_steps: usize,
    seed_offset: u64,
) -> PyResult<PyEvalSummary> {
    let mut agent = load_linear(path)?;
    Ok(run_evaluation(py, &mut agent, games, max_steps, seed_offset))
}
