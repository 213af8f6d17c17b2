//! Observation snapshots read from the rule engine.
//!
//! An `Observation` is one seat's view of the table at a point in time. It is
//! an owned copy: once read out of an engine handle the handle can be
//! released and the snapshot outlives it.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::{TableError, TableResult};
use super::seat::SeatId;

/// Most cards a single hand can hold.
pub const MAX_HAND_SIZE: usize = 13;

/// Number of opponents seen from any seat.
pub const OPPONENT_COUNT: usize = 3;

/// One seat's view of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Seat whose turn it is.
    pub current_player: SeatId,

    /// Cards held by the observed seat.
    pub your_hand: Vec<Card>,

    /// Combination currently on the table. Empty when there is nothing to beat.
    pub last_cards_played: Vec<Card>,

    /// Card counts of the other three seats, in turn order after the observer.
    pub num_cards_per_opponent: [u8; OPPONENT_COUNT],
}

impl Observation {
    /// Check the snapshot for internal consistency.
    ///
    /// A failure here means the engine handed back something the codec cannot
    /// represent, which is not recoverable.
    pub fn validate(&self) -> TableResult<()> {
        if self.your_hand.len() > MAX_HAND_SIZE {
            return Err(TableError::MalformedObservation(format!(
                "hand holds {} cards",
                self.your_hand.len()
            )));
        }
        if self.last_cards_played.len() > MAX_HAND_SIZE {
            return Err(TableError::MalformedObservation(format!(
                "last play holds {} cards",
                self.last_cards_played.len()
            )));
        }
        if let Some(count) = self
            .num_cards_per_opponent
            .iter()
            .find(|&&count| usize::from(count) > MAX_HAND_SIZE)
        {
            return Err(TableError::MalformedObservation(format!(
                "opponent holds {count} cards"
            )));
        }

        let mut seen = [false; super::card::DECK_SIZE];
        for card in self.your_hand.iter().chain(&self.last_cards_played) {
            let slot = &mut seen[card.index()];
            if *slot {
                return Err(TableError::MalformedObservation(format!(
                    "{card} appears twice"
                )));
            }
            *slot = true;
        }
        Ok(())
    }

    /// The observed hand in canonical ascending order.
    #[must_use]
    pub fn sorted_hand(&self) -> Vec<Card> {
        let mut hand = self.your_hand.clone();
        hand.sort_unstable();
        hand
    }

    /// True when the observed seat may lead any combination.
    #[must_use]
    pub fn is_leading(&self) -> bool {
        self.last_cards_played.is_empty()
    }
}
