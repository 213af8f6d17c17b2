//! Policy model hosted in the embedded Python runtime.

use numpy::{PyArray1, PyArrayMethods};
use pyo3::prelude::*;

use crate::core::{TableError, TableResult};
use crate::guard::{Release, ReleaseError};
use crate::nn::{ModelOutput, PolicyModel, Tensor};

use super::convert::outputs_from_py;

/// Wraps a Python model object.
///
/// The object is called as `model.predict(features)` when it has a `predict`
/// method and as `model(features)` otherwise. `features` is a float32 ndarray
/// of shape `[1, D]`.
pub struct PyPolicyModel {
    model: Option<PyObject>,
}

impl PyPolicyModel {
    pub fn new(model: PyObject) -> Self {
        Self { model: Some(model) }
    }
}

impl PolicyModel for PyPolicyModel {
    fn predict(&self, features: &Tensor) -> TableResult<ModelOutput> {
        let model = self.model.as_ref().ok_or(TableError::Released("model"))?;
        let (rows, cols) = match features.shape.as_slice() {
            [rows, cols] => (*rows, *cols),
            _ => (1, features.len()),
        };

        Python::with_gil(|py| {
            let input = PyArray1::from_slice_bound(py, &features.data).reshape([rows, cols])?;
            let model = model.bind(py);
            let output = if model.hasattr("predict")? {
                model.call_method1("predict", (input,))?
            } else {
                model.call1((input,))?
            };
            outputs_from_py(&output)
        })
    }
}

impl Release for PyPolicyModel {
    fn release(&mut self) -> Result<(), ReleaseError> {
        if let Some(model) = self.model.take() {
            Python::with_gil(|_py| drop(model));
        }
        Ok(())
    }
}
