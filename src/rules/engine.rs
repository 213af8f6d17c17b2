//! Rule engine contract.
//!
//! The engine owns the authoritative game state. The table never inspects it
//! directly; it only asks for observations and submits actions.
//!
//! ## Step-return convention
//!
//! `step` always returns a [`StepOutcome`]. When `done` is false the
//! observation is the *acting* seat's view after its move, so the caller must
//! follow up with `current_player_obs` to learn who acts next. When `done` is
//! true the observation is the final view and is reported as-is.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Observation, SeatId, TableResult};
use crate::guard::{Release, ReleaseError};

/// A handle from which an [`Observation`] snapshot can be read.
///
/// Native engines can hand out `Observation` values directly. Engines hosted
/// in a guest runtime hand out proxies that must be released.
pub trait ObservationSource: Release {
    /// Copy the observation out of the handle.
    fn read(&self) -> TableResult<Observation>;
}

impl ObservationSource for Observation {
    fn read(&self) -> TableResult<Observation> {
        Ok(self.clone())
    }
}

impl Release for Observation {
    fn release(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }
}

/// What `step` hands back.
#[derive(Clone, Debug)]
pub struct StepOutcome<O> {
    pub observation: O,
    pub done: bool,
}

impl<O> StepOutcome<O> {
    pub fn new(observation: O, done: bool) -> Self {
        Self { observation, done }
    }

    pub fn continuing(observation: O) -> Self {
        Self::new(observation, false)
    }

    pub fn finished(observation: O) -> Self {
        Self::new(observation, true)
    }
}

/// Rule engine trait.
///
/// ## Implementation Notes
///
/// - `reset`: deal a fresh game and return the current player's view
/// - `step`: apply `action` for the current player; an action the rules
///   reject must leave the state unchanged
/// - every method may fail at the boundary; such failures end the session
pub trait RuleEngine: Release {
    /// Observation handle type.
    type Observation: ObservationSource;

    /// Start a new game.
    fn reset(&mut self) -> TableResult<Self::Observation>;

    /// Apply an action for the current player.
    fn step(&mut self, action: &Action) -> TableResult<StepOutcome<Self::Observation>>;

    /// View of the seat whose turn it is.
    fn current_player_obs(&mut self) -> TableResult<Self::Observation>;

    /// View of an arbitrary seat.
    fn player_obs(&mut self, seat: SeatId) -> TableResult<Self::Observation>;
}

/// Result of a finished game from the local seat's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalOutcome {
    /// The local seat emptied its hand first.
    Won,
    /// Another seat emptied its hand first.
    Lost,
}

impl LocalOutcome {
    /// Interpret a terminal observation of the local seat.
    #[must_use]
    pub fn from_final_view(observation: &Observation) -> Self {
        if observation.your_hand.is_empty() {
            LocalOutcome::Won
        } else {
            LocalOutcome::Lost
        }
    }

    #[must_use]
    pub fn is_win(self) -> bool {
        matches!(self, LocalOutcome::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn view(hand: Vec<Card>) -> Observation {
        Observation {
            current_player: SeatId::new(0).unwrap(),
            your_hand: hand,
            last_cards_played: vec![],
            num_cards_per_opponent: [1, 2, 3],
        }
    }

    #[test]
    fn test_local_outcome_from_final_view() {
        assert_eq!(LocalOutcome::from_final_view(&view(vec![])), LocalOutcome::Won);
        assert!(LocalOutcome::Won.is_win());

        let lost = LocalOutcome::from_final_view(&view(vec!["4♣".parse().unwrap()]));
        assert_eq!(lost, LocalOutcome::Lost);
        assert!(!lost.is_win());
    }

    #[test]
    fn test_observation_is_its_own_source() {
        let mut obs = view(vec![]);
        assert_eq!(obs.read().unwrap(), obs);
        assert!(obs.release().is_ok());
    }

    #[test]
    fn test_step_outcome_constructors() {
        assert!(!StepOutcome::continuing(()).done);
        assert!(StepOutcome::finished(()).done);
    }
}
