//! Legality oracle used to build action masks.
//!
//! Which combinations beat which is the engine package's business. The mask
//! builder only needs a yes/no answer per candidate, so it talks to that logic
//! through this trait.

use crate::core::{Card, Observation};

/// Answers whether a candidate play is legal for the observed seat.
pub trait PlayRules {
    /// `candidate` is drawn from `observation.your_hand`; an empty slice asks
    /// whether passing is allowed.
    fn admits(&self, observation: &Observation, candidate: &[Card]) -> bool;
}

impl<F> PlayRules for F
where
    F: Fn(&Observation, &[Card]) -> bool,
{
    fn admits(&self, observation: &Observation, candidate: &[Card]) -> bool {
        self(observation, candidate)
    }
}
