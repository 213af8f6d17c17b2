//! Neural network integration.
//!
//! ## Overview
//!
//! - **Traits**: `PolicyModel` maps a feature tensor to category logits
//! - **Tensor**: flat `f32` buffer with a shape, used for features and logits
//! - **Baseline**: `UniformLogits`, `SeededLogits` for testing
//!
//! ## Usage
//!
//! ```rust
//! use big2_table::nn::{PolicyModel, Tensor, UniformLogits};
//!
//! let model = UniformLogits::new(1365);
//! let logits = model.predict(&Tensor::zeros(vec![1, 154])).unwrap();
//! assert_eq!(logits[0].len(), 1365);
//! ```

pub mod baseline;
pub mod traits;

pub use baseline::{SeededLogits, UniformLogits};
pub use traits::{ModelOutput, PolicyModel, Tensor};
