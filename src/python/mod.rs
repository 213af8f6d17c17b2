//! Adapters for an engine and model living in an embedded Python runtime.
//!
//! Enabled with the `python` feature. The host process embeds the
//! interpreter; every object obtained from it is a handle that is released
//! under the GIL as soon as the table is done reading it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use big2_table::python::open_session;
//!
//! let session = Python::with_gil(|py| -> PyResult<_> {
//!     let env = py.import_bound("big2.env")?.getattr("Big2Env")?.call0()?.unbind();
//!     let model = py.import_bound("big2.policy")?.getattr("load")?.call0()?.unbind();
//!     let admits = py.import_bound("big2.rules")?.getattr("admits")?.unbind();
//!     Ok(open_session(env, model, admits))
//! })?;
//! let mut table = TurnOrchestrator::new(session, TableConfig::default())?;
//! ```

use pyo3::prelude::*;

mod convert;
mod engine;
mod model;
mod rules;

pub use engine::{PyObservationHandle, PyRuleEngine};
pub use model::PyPolicyModel;
pub use rules::PyPlayRules;

use crate::codec::{Codec, StandardEncoder};
use crate::session::Session;

/// Session over a Python environment, model and legality helper.
pub fn open_session(
    env: PyObject,
    model: PyObject,
    admits: PyObject,
) -> Session<PyRuleEngine, PyPolicyModel> {
    let codec = Codec::new(Box::new(StandardEncoder::new()), Box::new(PyPlayRules::new(admits)));
    Session::new(PyRuleEngine::new(env), PyPolicyModel::new(model), codec)
}
