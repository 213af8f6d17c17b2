//! Error types shared across the table.
//!
//! Everything in [`TableError`] is session-fatal: once one escapes an
//! orchestrator operation the engine's state can no longer be trusted.
//! Rejected local moves are not errors; they come back as
//! `SubmitOutcome::invalid`.

use thiserror::Error;

use super::card::CardParseError;
use super::config::ConfigError;
use super::seat::SeatId;
use crate::orchestrator::TurnPhase;

/// Result alias used across the crate.
pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("the game ended before {local} took its first turn")]
    TerminalBeforeLocalTurn { local: SeatId },

    #[error("action mask has no legal category")]
    EmptyMask,

    #[error("policy chose category {category}, which the mask forbids")]
    IllegalDecision { category: usize },

    #[error("model returned {got} logits, expected {expected}")]
    LogitShape { expected: usize, got: usize },

    #[error("a local turn is already in progress")]
    TurnInProgress,

    #[error("operation not allowed while the table is {0:?}")]
    UnexpectedPhase(TurnPhase),

    #[error("it is {current}'s turn, not the local {local}")]
    NotLocalTurn { local: SeatId, current: SeatId },

    #[error("{0} is the local seat and cannot be played by the policy")]
    LocalSeatNotBot(SeatId),

    #[error("bots took more than {0} consecutive turns")]
    BotLoopLimit(usize),

    #[error("malformed observation: {0}")]
    MalformedObservation(String),

    #[error("seat {0} is out of range")]
    InvalidSeat(i64),

    #[error("unknown action category {0}")]
    UnknownCategory(usize),

    #[error("engine {op} failed: {message}")]
    Engine { op: &'static str, message: String },

    #[error("model inference failed: {0}")]
    Model(String),

    #[error("guest runtime error: {0}")]
    Boundary(String),

    #[error("{0} used after release")]
    Released(&'static str),

    #[error("session has been torn down")]
    SessionClosed,

    #[error(transparent)]
    Card(#[from] CardParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TableError {
    /// Engine failure helper for adapters.
    pub fn engine(op: &'static str, message: impl Into<String>) -> Self {
        TableError::Engine {
            op,
            message: message.into(),
        }
    }
}
