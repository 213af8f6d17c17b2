//! Contracts for the external rule engine.
//!
//! Engines implement `RuleEngine` to provide:
//! - Fresh deals and observations for any seat
//! - Application of actions for the current player
//! - The end-of-game signal through `StepOutcome::done`
//!
//! `PlayRules` exposes the engine package's legality check to the mask
//! builder. The table never decides on its own whether a combination wins.

pub mod engine;
pub mod play_rules;

pub use engine::{LocalOutcome, ObservationSource, RuleEngine, StepOutcome};
pub use play_rules::PlayRules;
