//! Turn orchestration for one local seat and three bots.
//!
//! ## Overview
//!
//! - **TurnOrchestrator**: owns the session and is the only caller of the
//!   engine's `reset` and `step`
//! - **TurnPhase**: `Bootstrapping -> AwaitingLocal <-> ResolvingBots -> Terminal`
//! - **TurnLatch**: rejects a local submission while another is in flight
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut table = TurnOrchestrator::new(session, TableConfig::default())?;
//! let view = table.reset()?;
//!
//! let outcome = table.submit_local_action(&selected)?;
//! if outcome.invalid {
//!     // show a warning, the local player is still up
//! } else if let Some(result) = outcome.local_result() {
//!     // game over
//! }
//!
//! table.teardown();
//! ```

pub mod latch;
pub mod phase;
pub mod table;

pub use latch::{LatchGuard, TurnLatch};
pub use phase::TurnPhase;
pub use table::{BotPlay, SubmitOutcome, TurnOrchestrator};
