//! Rule engine hosted in the embedded Python runtime.

use pyo3::prelude::*;

use crate::core::{Action, Observation, SeatId, TableError, TableResult};
use crate::guard::{Release, ReleaseError};
use crate::rules::{ObservationSource, RuleEngine, StepOutcome};

use super::convert::{cards_to_py, observation_from_py};

/// A Python observation object, read on demand and released under the GIL.
pub struct PyObservationHandle {
    obj: Option<PyObject>,
}

impl PyObservationHandle {
    pub fn new(obj: PyObject) -> Self {
        Self { obj: Some(obj) }
    }
}

impl ObservationSource for PyObservationHandle {
    fn read(&self) -> TableResult<Observation> {
        let obj = self.obj.as_ref().ok_or(TableError::Released("observation"))?;
        Python::with_gil(|py| observation_from_py(obj.bind(py)))
    }
}

impl Release for PyObservationHandle {
    fn release(&mut self) -> Result<(), ReleaseError> {
        if let Some(obj) = self.obj.take() {
            Python::with_gil(|_py| drop(obj));
        }
        Ok(())
    }
}

/// Drives a Python environment object.
///
/// The object must provide `reset()`, `step(cards) -> (obs, done)`,
/// `get_current_player_obs()` and `get_player_obs(seat)`. A `close()` method
/// is called on release when present.
pub struct PyRuleEngine {
    env: Option<PyObject>,
    card_factory: Option<PyObject>,
}

impl PyRuleEngine {
    pub fn new(env: PyObject) -> Self {
        Self {
            env: Some(env),
            card_factory: None,
        }
    }

    /// Build outgoing cards with `factory(rank, suit)` instead of tuples.
    pub fn with_card_factory(mut self, factory: PyObject) -> Self {
        self.card_factory = Some(factory);
        self
    }

    fn call<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(Python<'_>, &Bound<'_, PyAny>) -> PyResult<T>,
    ) -> TableResult<T> {
        let env = self.env.as_ref().ok_or(TableError::Released("engine"))?;
        Python::with_gil(|py| f(py, env.bind(py)))
            .map_err(|err| TableError::engine(op, err.to_string()))
    }
}

impl RuleEngine for PyRuleEngine {
    type Observation = PyObservationHandle;

    fn reset(&mut self) -> TableResult<PyObservationHandle> {
        let obj = self.call("reset", |_, env| Ok(env.call_method0("reset")?.unbind()))?;
        Ok(PyObservationHandle::new(obj))
    }

    fn step(&mut self, action: &Action) -> TableResult<StepOutcome<PyObservationHandle>> {
        let factory = self.card_factory.as_ref();
        let (obj, done) = self.call("step", |py, env| {
            let cards = cards_to_py(py, &action.cards, factory)?;
            let (obs, done): (Bound<'_, PyAny>, bool) =
                env.call_method1("step", (cards,))?.extract()?;
            Ok((obs.unbind(), done))
        })?;
        Ok(StepOutcome::new(PyObservationHandle::new(obj), done))
    }

    fn current_player_obs(&mut self) -> TableResult<PyObservationHandle> {
        let obj = self.call("get_current_player_obs", |_, env| {
            Ok(env.call_method0("get_current_player_obs")?.unbind())
        })?;
        Ok(PyObservationHandle::new(obj))
    }

    fn player_obs(&mut self, seat: SeatId) -> TableResult<PyObservationHandle> {
        let obj = self.call("get_player_obs", |_, env| {
            Ok(env.call_method1("get_player_obs", (seat.index(),))?.unbind())
        })?;
        Ok(PyObservationHandle::new(obj))
    }
}

impl Release for PyRuleEngine {
    fn release(&mut self) -> Result<(), ReleaseError> {
        let env = self.env.take();
        let factory = self.card_factory.take();
        Python::with_gil(|py| {
            drop(factory);
            let Some(env) = env else {
                return Ok(());
            };
            let env = env.into_bound(py);
            if env.hasattr("close").unwrap_or(false) {
                env.call_method0("close")
                    .map_err(|err| ReleaseError::new("engine", err.to_string()))?;
            }
            Ok(())
        })
    }
}
