//! Card/action codec.
//!
//! ## Overview
//!
//! - **Categories**: `CategoryMaps` enumerates the fixed 1365-entry action
//!   space as slot sets over the sorted hand
//! - **Features**: `FeatureEncoder` turns an observation into a `[1, D]` row
//! - **Masks**: `generate_mask` flags which categories the rules admit
//! - **Local play**: `translate_local_selection` maps a UI selection to an
//!   engine action without touching the category space
//!
//! ## Usage
//!
//! ```rust
//! use big2_table::codec::Codec;
//! use big2_table::core::{Card, Observation, SeatId};
//!
//! let codec = Codec::with_rules(|_: &Observation, candidate: &[Card]| candidate.len() == 1);
//! let obs = Observation {
//!     current_player: SeatId::new(0).unwrap(),
//!     your_hand: vec!["5♣".parse().unwrap()],
//!     last_cards_played: vec![],
//!     num_cards_per_opponent: [13, 13, 13],
//! };
//!
//! let mask = codec.mask(&obs).unwrap();
//! assert_eq!(mask.legal_count(), 1);
//! ```

pub mod category;
pub mod encoder;
pub mod mask;

pub use category::{CategoryId, CategoryMaps, SlotSet, ACTION_SPACE_SIZE, HAND_SLOTS};
pub use encoder::{FeatureEncoder, StandardEncoder, STANDARD_FEATURES};
pub use mask::{generate_mask, ActionMask};

use crate::core::{Action, Card, Observation, TableError, TableResult};
use crate::guard::{Release, ReleaseError};
use crate::nn::Tensor;
use crate::rules::PlayRules;

/// Map cards the local player selected to the action sent to the engine.
///
/// Order is preserved and nothing is checked; the engine judges legality.
#[must_use]
pub fn translate_local_selection(selected: &[Card]) -> Action {
    Action::from_cards(selected)
}

/// Everything needed to turn an observation into model input and back.
///
/// Built once per session and released with it.
pub struct Codec {
    maps: CategoryMaps,
    encoder: Box<dyn FeatureEncoder>,
    rules: Box<dyn PlayRules>,
}

impl Codec {
    pub fn new(encoder: Box<dyn FeatureEncoder>, rules: Box<dyn PlayRules>) -> Self {
        Self {
            maps: CategoryMaps::build(),
            encoder,
            rules,
        }
    }

    /// Codec with the [`StandardEncoder`].
    pub fn with_rules<R: PlayRules + 'static>(rules: R) -> Self {
        Self::new(Box::new(StandardEncoder::new()), Box::new(rules))
    }

    #[must_use]
    pub fn maps(&self) -> &CategoryMaps {
        &self.maps
    }

    #[must_use]
    pub fn encoder(&self) -> &dyn FeatureEncoder {
        self.encoder.as_ref()
    }

    #[must_use]
    pub fn action_space_size(&self) -> usize {
        self.maps.len()
    }

    pub fn encode(&self, observation: &Observation) -> TableResult<Tensor> {
        self.encoder.encode(observation)
    }

    pub fn mask(&self, observation: &Observation) -> TableResult<ActionMask> {
        generate_mask(&self.maps, observation, self.rules.as_ref())
    }

    /// Concrete cards for `category`, drawn from the observed seat's hand.
    pub fn resolve(&self, category: CategoryId, observation: &Observation) -> TableResult<Action> {
        let slots = self
            .maps
            .category_to_action(category)
            .ok_or(TableError::UnknownCategory(category.index()))?;
        Ok(slots.resolve(&observation.sorted_hand()))
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("categories", &self.maps.len())
            .field("features", &self.encoder.feature_len())
            .finish_non_exhaustive()
    }
}

impl Release for Codec {
    /// Drops the rules (which may hold a guest object) and clears the maps.
    /// A released codec admits nothing.
    fn release(&mut self) -> Result<(), ReleaseError> {
        self.rules = Box::new(|_: &Observation, _: &[Card]| false);
        self.maps.release()
    }
}
