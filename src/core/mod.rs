//! Core table types: cards, seats, actions, observations, configuration, errors.
//!
//! Nothing in here talks to the engine or the model; these are the plain
//! values that flow between them.

pub mod action;
pub mod card;
pub mod config;
pub mod error;
pub mod observation;
pub mod seat;

pub use action::Action;
pub use card::{Card, CardParseError, Rank, Suit, DECK_SIZE};
pub use config::{ConfigError, TableConfig};
pub use error::{TableError, TableResult};
pub use observation::{Observation, MAX_HAND_SIZE, OPPONENT_COUNT};
pub use seat::{SeatId, SEAT_COUNT};
