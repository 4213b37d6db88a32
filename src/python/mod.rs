//! Python bindings for the Go Fish engine.
//!
//! # Quick Start
//!
//! ```python
//! import go_fish
//!
//! env = go_fish.GoFishEnv(mode="train", seed=42)
//! obs, info = env.reset()
//! obs, reward, terminated, truncated, info = env.step(3)
//!
//! # Drive the opponent from Python
//! env.set_opponent_policy(lambda obs: int(model.predict(obs)[0]))
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_policy;

pub use py_env::*;
pub use py_policy::*;

/// go_fish: a two-player Go Fish environment for RL training.
#[pymodule]
fn go_fish(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGoFishEnv>()?;
    m.add_class::<PyEvalSummary>()?;
    m.add_function(wrap_pyfunction!(evaluate_callable, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_linear, m)?)?;
    m.add("OBSERVATION_SIZE", crate::nn::OneHotEncoder::LEN)?;
    m.add("ACTION_SIZE", crate::core::RANK_COUNT)?;
    Ok(())
}
