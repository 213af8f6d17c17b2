//! Observation encoding for model input.
//!
//! Turns a seat's [`Observation`] into the flat feature row the policy model
//! consumes.

use crate::core::{Card, Observation, TableResult, DECK_SIZE, MAX_HAND_SIZE, OPPONENT_COUNT};
use crate::nn::Tensor;

/// Encodes observations into `[1, D]` feature tensors.
///
/// Each encoder defines:
/// - How to convert a seat's view to a feature row
/// - The shape of the output tensor
///
/// Encoding must be a pure function of the observation.
pub trait FeatureEncoder: Send + Sync {
    /// Encode one observation. Fails on a malformed snapshot.
    fn encode(&self, observation: &Observation) -> TableResult<Tensor>;

    /// Shape of encoded features, always `[1, D]`.
    fn output_shape(&self) -> Vec<usize> {
        vec![1, self.feature_len()]
    }

    /// Width `D` of the feature row.
    fn feature_len(&self) -> usize;
}

/// Largest last-play size tracked individually. Bigger plays share the last bucket.
const MAX_TRACKED_PLAY: usize = 5;

const HAND_OFFSET: usize = 0;
const LAST_PLAY_OFFSET: usize = HAND_OFFSET + DECK_SIZE;
const LAST_PLAY_SIZE_OFFSET: usize = LAST_PLAY_OFFSET + DECK_SIZE;
const OPPONENT_OFFSET: usize = LAST_PLAY_SIZE_OFFSET + MAX_TRACKED_PLAY + 1;
const OPPONENT_BUCKETS: usize = MAX_HAND_SIZE + 1;
const HAND_SIZE_OFFSET: usize = OPPONENT_OFFSET + OPPONENT_COUNT * OPPONENT_BUCKETS;
const LEADING_OFFSET: usize = HAND_SIZE_OFFSET + 1;

/// Width of the [`StandardEncoder`] feature row.
pub const STANDARD_FEATURES: usize = LEADING_OFFSET + 1;

/// Default encoder for four-seat play.
///
/// Layout of the 154 features:
///
/// | Range | Meaning |
/// |---|---|
/// | `[0, 52)` | own hand, one-hot by card index |
/// | `[52, 104)` | last play, one-hot by card index |
/// | `[104, 110)` | last play size 0..=5 |
/// | `[110, 152)` | each opponent's card count 0..=13 |
/// | `152` | own hand size / 13 |
/// | `153` | 1.0 when leading |
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEncoder;

impl StandardEncoder {
    pub fn new() -> Self {
        Self
    }

    fn one_hot_cards(features: &mut [f32], offset: usize, cards: &[Card]) {
        for card in cards {
            features[offset + card.index()] = 1.0;
        }
    }
}

impl FeatureEncoder for StandardEncoder {
    fn encode(&self, observation: &Observation) -> TableResult<Tensor> {
        observation.validate()?;

        let mut features = vec![0.0f32; STANDARD_FEATURES];

        Self::one_hot_cards(&mut features, HAND_OFFSET, &observation.your_hand);
        Self::one_hot_cards(&mut features, LAST_PLAY_OFFSET, &observation.last_cards_played);

        let played = observation.last_cards_played.len().min(MAX_TRACKED_PLAY);
        features[LAST_PLAY_SIZE_OFFSET + played] = 1.0;

        for (i, &count) in observation.num_cards_per_opponent.iter().enumerate() {
            features[OPPONENT_OFFSET + i * OPPONENT_BUCKETS + usize::from(count)] = 1.0;
        }

        features[HAND_SIZE_OFFSET] = observation.your_hand.len() as f32 / MAX_HAND_SIZE as f32;
        if observation.is_leading() {
            features[LEADING_OFFSET] = 1.0;
        }

        Ok(Tensor::row(features))
    }

    fn feature_len(&self) -> usize {
        STANDARD_FEATURES
    }
}
