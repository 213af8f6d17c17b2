//! The turn orchestrator.

use serde::{Deserialize, Serialize};
use tracing::{debug, event, info, warn, Level};

use crate::codec::{translate_local_selection, CategoryId};
use crate::core::{Action, Card, Observation, SeatId, TableConfig, TableError, TableResult};
use crate::guard::Scoped;
use crate::nn::PolicyModel;
use crate::policy::PolicyAgent;
use crate::rules::{LocalOutcome, ObservationSource, RuleEngine, StepOutcome};
use crate::session::Session;

use super::latch::TurnLatch;
use super::phase::TurnPhase;

/// One bot move, for replay and display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPlay {
    pub seat: SeatId,
    pub category: CategoryId,
    pub action: Action,
}

/// What a local submission produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// View to show the local player next.
    ///
    /// When the game ended this is the engine's final view, which belongs to
    /// whichever seat made the last move.
    pub observation: Observation,

    /// The game is over.
    pub done: bool,

    /// The engine ignored the local action. Nothing else happened.
    pub invalid: bool,

    /// Bot moves made after the local action, in order.
    pub bot_plays: Vec<BotPlay>,
}

impl SubmitOutcome {
    /// Result for the local seat, once the game is over.
    #[must_use]
    pub fn local_result(&self) -> Option<LocalOutcome> {
        if !self.done {
            return None;
        }
        if self.bot_plays.is_empty() {
            Some(LocalOutcome::from_final_view(&self.observation))
        } else {
            // A bot's move ended the game, so the view is that bot's.
            Some(LocalOutcome::Lost)
        }
    }
}

/// Drives the engine through bot turns around each local move.
///
/// ## Lifecycle
///
/// 1. `new` starts in [`TurnPhase::Bootstrapping`]
/// 2. `reset` deals and plays bots until the local seat is up
/// 3. `submit_local_action` applies the local move, then plays bots again
/// 4. `teardown` (or drop) releases the session
///
/// Every engine observation is read once and released immediately.
pub struct TurnOrchestrator<E: RuleEngine, M: PolicyModel> {
    session: Session<E, M>,
    config: TableConfig,
    agent: PolicyAgent,
    phase: TurnPhase,
    latch: TurnLatch,
}

impl<E: RuleEngine, M: PolicyModel> TurnOrchestrator<E, M> {
    pub fn new(session: Session<E, M>, config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        Ok(Self {
            session,
            agent: PolicyAgent::new(config.illegal_penalty),
            config,
            phase: TurnPhase::Bootstrapping,
            latch: TurnLatch::new(),
        })
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Latch handle for the UI.
    #[must_use]
    pub fn latch(&self) -> &TurnLatch {
        &self.latch
    }

    #[must_use]
    pub fn local_seat(&self) -> SeatId {
        self.config.local_seat
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Session<E, M> {
        &self.session
    }

    /// Give up the orchestrator and keep the session.
    pub fn into_session(self) -> Session<E, M> {
        self.session
    }

    /// Release the session. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Err(err) = self.session.teardown() {
            warn!(target: "big2_table::orchestrator", error = %err, "teardown incomplete");
        }
        self.phase = TurnPhase::Terminal;
    }

    /// Start a new game and play bots until it is the local seat's turn.
    ///
    /// A game that ends before the local seat moves is fatal.
    pub fn reset(&mut self) -> TableResult<Observation> {
        let _guard = self.latch.try_engage().ok_or(TableError::TurnInProgress)?;
        self.phase = TurnPhase::Bootstrapping;

        let result = self.reset_inner();
        if let Err(err) = &result {
            event!(target: "big2_table::orchestrator", Level::ERROR, error = %err, "reset failed");
            self.phase = TurnPhase::Terminal;
        }
        result
    }

    fn reset_inner(&mut self) -> TableResult<Observation> {
        let handle = self.session.engine_mut()?.reset()?;
        let dealt = read_released("reset observation", handle)?;
        info!(
            target: "big2_table::orchestrator",
            first = %dealt.current_player,
            local = %self.config.local_seat,
            "new game"
        );

        let (observation, done, plays) = self.run_bots(dealt)?;
        if done {
            return Err(TableError::TerminalBeforeLocalTurn {
                local: self.config.local_seat,
            });
        }

        debug!(target: "big2_table::orchestrator", bots = plays.len(), "local seat is up");
        self.phase = TurnPhase::AwaitingLocal;
        Ok(observation)
    }

    /// Apply the local player's selected cards, then let the bots move.
    ///
    /// An empty selection passes. If the engine leaves the table unchanged the
    /// move was illegal: the outcome is flagged `invalid` and the local player
    /// is still up.
    pub fn submit_local_action(&mut self, selected: &[Card]) -> TableResult<SubmitOutcome> {
        let _guard = self.latch.try_engage().ok_or(TableError::TurnInProgress)?;
        if !self.phase.accepts_local_action() {
            return Err(TableError::UnexpectedPhase(self.phase));
        }

        let result = self.submit_inner(selected);
        if let Err(err) = &result {
            event!(
                target: "big2_table::orchestrator",
                Level::ERROR,
                error = %err,
                "submission failed"
            );
            self.phase = TurnPhase::Terminal;
        }
        result
    }

    fn submit_inner(&mut self, selected: &[Card]) -> TableResult<SubmitOutcome> {
        let local = self.config.local_seat;
        let engine = self.session.engine_mut()?;

        let before = read_released("local observation", engine.current_player_obs()?)?;
        if before.current_player != local {
            return Err(TableError::NotLocalTurn {
                local,
                current: before.current_player,
            });
        }
        let prev = before.last_cards_played;

        let action = translate_local_selection(selected);
        let StepOutcome { observation, done } = engine.step(&action)?;
        let after = read_released("step observation", observation)?;

        if done {
            info!(target: "big2_table::orchestrator", %action, "local move ended the game");
            self.phase = TurnPhase::Terminal;
            return Ok(SubmitOutcome {
                observation: after,
                done: true,
                invalid: false,
                bot_plays: Vec::new(),
            });
        }

        if !action.is_pass() && after.last_cards_played == prev {
            debug!(target: "big2_table::orchestrator", %action, "engine rejected local move");
            return Ok(SubmitOutcome {
                observation: after,
                done: false,
                invalid: true,
                bot_plays: Vec::new(),
            });
        }

        let next = read_released("current observation", engine.current_player_obs()?)?;
        self.phase = TurnPhase::ResolvingBots;

        let (observation, done, bot_plays) = self.run_bots(next)?;
        self.phase = if done {
            TurnPhase::Terminal
        } else {
            TurnPhase::AwaitingLocal
        };

        Ok(SubmitOutcome {
            observation,
            done,
            invalid: false,
            bot_plays,
        })
    }

    /// Resolve bot turns until the local seat is current or the game ends.
    fn run_bots(&mut self, start: Observation) -> TableResult<(Observation, bool, Vec<BotPlay>)> {
        let local = self.config.local_seat;
        let mut observation = start;
        let mut plays = Vec::new();

        while observation.current_player != local {
            if plays.len() >= self.config.max_bot_turns {
                return Err(TableError::BotLoopLimit(self.config.max_bot_turns));
            }
            let (next, done, play) = self.resolve_one_bot_turn(&observation)?;
            plays.push(play);
            if done {
                return Ok((next, true, plays));
            }
            observation = next;
        }

        Ok((observation, false, plays))
    }

    /// Let the policy play for the seat behind `observation`.
    ///
    /// Returns the next view to act on, whether the game ended, and the move
    /// made. `observation` must be the current player's own view, and that
    /// player must be a bot.
    fn resolve_one_bot_turn(
        &mut self,
        observation: &Observation,
    ) -> TableResult<(Observation, bool, BotPlay)> {
        if observation.current_player == self.config.local_seat {
            return Err(TableError::LocalSeatNotBot(observation.current_player));
        }
        let agent = self.agent;
        let (engine, model, codec) = self.session.parts_mut()?;

        let decision = agent.decide(model, codec, observation)?;
        let StepOutcome { observation: handle, done } = engine.step(&decision.action)?;
        let stepped = read_released("step observation", handle)?;

        let next = if done {
            stepped
        } else {
            read_released("current observation", engine.current_player_obs()?)?
        };

        event!(
            target: "big2_table::orchestrator",
            Level::DEBUG,
            seat = %observation.current_player,
            category = %decision.category,
            action = %decision.action,
            done,
            "bot played"
        );

        let play = BotPlay {
            seat: observation.current_player,
            category: decision.category,
            action: decision.action,
        };
        Ok((next, done, play))
    }

    /// Any seat's view, without changing turn state.
    pub fn observe_seat(&mut self, seat: SeatId) -> TableResult<Observation> {
        let handle = self.session.engine_mut()?.player_obs(seat)?;
        read_released("seat observation", handle)
    }
}

impl<E: RuleEngine, M: PolicyModel> std::fmt::Debug for TurnOrchestrator<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("phase", &self.phase)
            .field("local_seat", &self.config.local_seat)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Copy an observation out of its handle and release the handle.
fn read_released<O: ObservationSource>(label: &'static str, handle: O) -> TableResult<Observation> {
    let handle = Scoped::new(label, handle);
    let observation = handle.read();
    handle.dispose();
    observation
}
