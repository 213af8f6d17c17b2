//! Decision-making for bot seats.

use serde::{Deserialize, Serialize};

use crate::codec::{CategoryId, Codec};
use crate::core::{Action, Observation, TableResult};
use crate::nn::PolicyModel;

use super::select::select_action;

/// A bot's choice: the category and the cards it resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub category: CategoryId,
    pub action: Action,
}

/// Runs encode, mask and masked argmax for one observation.
#[derive(Clone, Copy, Debug)]
pub struct PolicyAgent {
    penalty: f32,
}

impl PolicyAgent {
    pub fn new(penalty: f32) -> Self {
        Self { penalty }
    }

    #[must_use]
    pub fn penalty(&self) -> f32 {
        self.penalty
    }

    /// Choose an action for the seat behind `observation`.
    pub fn decide<M: PolicyModel + ?Sized>(
        &self,
        model: &M,
        codec: &Codec,
        observation: &Observation,
    ) -> TableResult<PolicyDecision> {
        let features = codec.encode(observation)?;
        let mask = codec.mask(observation)?;
        let category = select_action(model, &features, &mask, self.penalty)?;
        let action = codec.resolve(category, observation)?;
        Ok(PolicyDecision { category, action })
    }
}

impl Default for PolicyAgent {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_ILLEGAL_PENALTY)
    }
}
