//! Inference model contract.
//!
//! These types define the interface between the table and a policy model
//! (typically hosted in Python via the `python` feature).

use serde::{Deserialize, Serialize};

use crate::core::TableResult;
use crate::guard::Release;

/// Dense tensor as a flat buffer plus shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    /// Flattened tensor data (row-major order).
    pub data: Vec<f32>,

    /// Shape of the tensor (e.g., `[1, features]`).
    pub shape: Vec<usize>,
}

impl Tensor {
    /// Create a new tensor.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            data.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { data, shape }
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            data: vec![0.0; size],
            shape,
        }
    }

    /// A `[1, n]` batch holding one row.
    pub fn row(data: Vec<f32>) -> Self {
        let n = data.len();
        Self::new(data, vec![1, n])
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Everything a model returns for one input. Only the first tensor is used.
pub type ModelOutput = Vec<Tensor>;

/// Policy model producing one logit per action category.
///
/// `predict` receives a `[1, D]` feature tensor and returns at least one
/// tensor whose first entry holds `A` logits, where `A` is the size of the
/// category space.
pub trait PolicyModel: Release {
    fn predict(&self, features: &Tensor) -> TableResult<ModelOutput>;
}

impl<M: PolicyModel + ?Sized> PolicyModel for Box<M> {
    fn predict(&self, features: &Tensor) -> TableResult<ModelOutput> {
        (**self).predict(features)
    }
}
