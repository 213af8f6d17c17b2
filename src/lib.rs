//! # big2-table
//!
//! Turn orchestration for a four-seat Big Two table: one local player and
//! three bots driven by a policy model, on top of an external rule engine.
//!
//! ## Design Principles
//!
//! 1. **The engine is authoritative**: game state and combination rules live
//!    in the engine. The table only reads observations and submits actions.
//!
//! 2. **Bots never play illegal moves**: every decision is a masked argmax
//!    over a fixed category space, re-checked before it reaches the engine.
//!
//! 3. **Every boundary handle is released**: observations, engines, models
//!    and category maps may live in a guest runtime, so each one is released
//!    exactly once on every exit path.
//!
//! ## Architecture
//!
//! - **Slot-based action space**: 1365 categories over positions in the
//!   acting seat's sorted hand, so the same model output fits any hand.
//!
//! - **Asymmetric step convention**: a continuing `step` returns the acting
//!   seat's view and needs a follow-up `current_player_obs`; a finishing
//!   `step` returns the final view directly.
//!
//! ## Modules
//!
//! - `core`: cards, seats, actions, observations, configuration, errors
//! - `codec`: category maps, feature encoding, action masks
//! - `nn`: tensors and the `PolicyModel` contract
//! - `policy`: masked argmax and the bot `PolicyAgent`
//! - `rules`: the `RuleEngine` and `PlayRules` contracts
//! - `guard`: release discipline for boundary handles
//! - `session`: the engine, model and codec a table runs on
//! - `orchestrator`: the turn state machine
//! - `python`: adapters for an embedded Python runtime (feature `python`)

pub mod codec;
pub mod core;
pub mod guard;
pub mod nn;
pub mod orchestrator;
pub mod policy;
pub mod rules;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, Card, CardParseError, ConfigError, Observation, Rank, SeatId, Suit, TableConfig,
    TableError, TableResult,
};

pub use crate::codec::{
    generate_mask, translate_local_selection, ActionMask, CategoryId, CategoryMaps, Codec,
    FeatureEncoder, SlotSet, StandardEncoder, ACTION_SPACE_SIZE,
};

pub use crate::nn::{ModelOutput, PolicyModel, SeededLogits, Tensor, UniformLogits};

pub use crate::policy::{select_action, PolicyAgent, PolicyDecision};

pub use crate::rules::{LocalOutcome, ObservationSource, PlayRules, RuleEngine, StepOutcome};

pub use crate::guard::{Release, ReleaseError, Scoped};

pub use crate::session::Session;

pub use crate::orchestrator::{BotPlay, SubmitOutcome, TurnLatch, TurnOrchestrator, TurnPhase};
