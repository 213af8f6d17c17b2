use serde::{Deserialize, Serialize};

/// Where the table is in its turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Built, or inside `reset` before the local seat is reached.
    #[default]
    Bootstrapping,
    /// Waiting for the local player to submit.
    AwaitingLocal,
    /// Bots are taking their turns.
    ResolvingBots,
    /// The game is over or the session hit a fatal error.
    Terminal,
}

impl TurnPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Terminal)
    }

    #[must_use]
    pub fn accepts_local_action(self) -> bool {
        matches!(self, TurnPhase::AwaitingLocal)
    }
}
