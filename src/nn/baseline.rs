//! Baseline models for tests, benches and model-less tables.

use std::hash::Hasher;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use crate::core::TableResult;
use crate::guard::{Release, ReleaseError};

use super::traits::{ModelOutput, PolicyModel, Tensor};

/// Returns all-zero logits. Masked argmax then picks the lowest legal category.
#[derive(Clone, Debug, Default)]
pub struct UniformLogits {
    action_space_size: usize,
}

impl UniformLogits {
    pub fn new(action_space_size: usize) -> Self {
        Self { action_space_size }
    }
}

impl PolicyModel for UniformLogits {
    fn predict(&self, _features: &Tensor) -> TableResult<ModelOutput> {
        Ok(vec![Tensor::zeros(vec![1, self.action_space_size])])
    }
}

impl Release for UniformLogits {
    fn release(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }
}

/// Random logits that are a pure function of `(seed, features)`.
///
/// The same observation always gets the same logits, so games driven by this
/// model replay identically.
#[derive(Clone, Debug)]
pub struct SeededLogits {
    action_space_size: usize,
    seed: u64,
}

impl SeededLogits {
    pub fn new(action_space_size: usize, seed: u64) -> Self {
        Self {
            action_space_size,
            seed,
        }
    }

    fn rng_for(&self, features: &Tensor) -> ChaCha8Rng {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        for value in &features.data {
            hasher.write_u32(value.to_bits());
        }
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }
}

impl PolicyModel for SeededLogits {
    fn predict(&self, features: &Tensor) -> TableResult<ModelOutput> {
        let mut rng = self.rng_for(features);
        let logits = (0..self.action_space_size)
            .map(|_| rng.gen_range(-1.0f32..1.0))
            .collect();
        Ok(vec![Tensor::row(logits)])
    }
}

impl Release for SeededLogits {
    fn release(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_logits_shape() {
        let model = UniformLogits::new(5);
        let out = model.predict(&Tensor::zeros(vec![1, 10])).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shape, vec![1, 5]);
        assert!(out[0].data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_uniform_logits_default() {
        let model = UniformLogits::default();
        let out = model.predict(&Tensor::zeros(vec![1, 3])).unwrap();
        assert!(out[0].is_empty());
    }

    #[test]
    fn test_seeded_logits_deterministic() {
        let model = SeededLogits::new(8, 42);
        let features = Tensor::row(vec![0.0, 1.0, 0.0]);

        let a = model.predict(&features).unwrap();
        let b = model.predict(&features).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].len(), 8);
        assert!(a[0].data.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_seeded_logits_depend_on_input_and_seed() {
        let features = Tensor::row(vec![0.0, 1.0, 0.0]);
        let other = Tensor::row(vec![1.0, 0.0, 0.0]);

        let model = SeededLogits::new(16, 42);
        assert_ne!(model.predict(&features).unwrap(), model.predict(&other).unwrap());

        let reseeded = SeededLogits::new(16, 43);
        assert_ne!(
            model.predict(&features).unwrap(),
            reseeded.predict(&features).unwrap()
        );
    }

    #[test]
    fn test_baselines_release_cleanly() {
        assert!(UniformLogits::new(1).release().is_ok());
        assert!(SeededLogits::new(1, 0).release().is_ok());
    }
}
