//! Legal-action masks over the category space.

use serde::{Deserialize, Serialize};

use crate::core::{Observation, TableResult};
use crate::rules::PlayRules;

use super::category::{CategoryId, CategoryMaps};

/// One legality flag per category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMask {
    legal: Vec<bool>,
}

impl ActionMask {
    pub fn new(legal: Vec<bool>) -> Self {
        Self { legal }
    }

    /// Mask of `len` categories with only `legal` set.
    pub fn only(len: usize, legal: &[CategoryId]) -> Self {
        let mut flags = vec![false; len];
        for category in legal {
            if let Some(flag) = flags.get_mut(category.index()) {
                *flag = true;
            }
        }
        Self::new(flags)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.legal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legal.is_empty()
    }

    /// Out-of-range categories are illegal.
    #[must_use]
    pub fn is_legal(&self, category: CategoryId) -> bool {
        self.legal.get(category.index()).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.legal.iter().filter(|&&legal| legal).count()
    }

    #[must_use]
    pub fn any_legal(&self) -> bool {
        self.legal.iter().any(|&legal| legal)
    }

    pub fn iter_legal(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.legal
            .iter()
            .enumerate()
            .filter(|(_, &legal)| legal)
            .map(|(i, _)| CategoryId(i as u16))
    }

    /// The mask as 0/1 floats, the form a model-side consumer expects.
    #[must_use]
    pub fn as_f32(&self) -> Vec<f32> {
        self.legal.iter().map(|&legal| if legal { 1.0 } else { 0.0 }).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.legal
    }
}

/// Build the mask for the seat behind `observation`.
///
/// A category is legal when every slot it selects exists in the seat's sorted
/// hand and `rules` admits the resolved cards. Pass is offered to `rules` as
/// an empty candidate.
pub fn generate_mask(
    maps: &CategoryMaps,
    observation: &Observation,
    rules: &dyn PlayRules,
) -> TableResult<ActionMask> {
    observation.validate()?;

    let hand = observation.sorted_hand();
    let legal = maps
        .iter()
        .map(|(_, slots)| {
            slots.fits(hand.len()) && rules.admits(observation, &slots.resolve(&hand).cards)
        })
        .collect();

    Ok(ActionMask::new(legal))
}
