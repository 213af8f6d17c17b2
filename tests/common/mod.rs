//! Shared fixtures: a small native rule engine with a release ledger.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use big2_table::core::{Action, Card, Observation, Rank, SeatId, Suit, TableResult, SEAT_COUNT};
use big2_table::guard::{Release, ReleaseError};
use big2_table::nn::{ModelOutput, PolicyModel, Tensor};
use big2_table::rules::{ObservationSource, PlayRules, RuleEngine, StepOutcome};
use big2_table::{Codec, Session, TableConfig, TurnOrchestrator};

/// Counts everything the table acquires and releases.
#[derive(Debug, Default)]
pub struct Ledger {
    pub acquired: Cell<usize>,
    pub released: Cell<usize>,
    pub engine_released: Cell<usize>,
    pub model_released: Cell<usize>,
    pub steps: Cell<usize>,
    pub rejected: Cell<usize>,
    /// Observation handles refuse to release (but still count the attempt).
    pub fail_release: Cell<bool>,
}

impl Ledger {
    pub fn outstanding(&self) -> usize {
        self.acquired.get() - self.released.get()
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// Observation handle that reports its release to the ledger.
#[derive(Debug)]
pub struct TrackedObservation {
    observation: Observation,
    ledger: Rc<Ledger>,
    released: bool,
}

impl ObservationSource for TrackedObservation {
    fn read(&self) -> TableResult<Observation> {
        Ok(self.observation.clone())
    }
}

impl Release for TrackedObservation {
    fn release(&mut self) -> Result<(), ReleaseError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        bump(&self.ledger.released);
        if self.ledger.fail_release.get() {
            Err(ReleaseError::new("observation", "guest already collected it"))
        } else {
            Ok(())
        }
    }
}

/// Simplified climbing rules.
///
/// Leading allows singles, same-rank pairs and triples, any five cards, or a
/// whole 13-card hand. Following needs the same count with a higher top card.
/// Passing is allowed only when following.
pub fn toy_admits(last: &[Card], candidate: &[Card]) -> bool {
    if candidate.is_empty() {
        return !last.is_empty();
    }
    let same_rank = candidate.iter().all(|card| card.rank == candidate[0].rank);
    let shape_ok = match candidate.len() {
        1 | 5 => true,
        2 | 3 => same_rank,
        13 => last.is_empty(),
        _ => false,
    };
    if !shape_ok {
        return false;
    }
    if last.is_empty() {
        return true;
    }
    candidate.len() == last.len() && candidate.iter().max() > last.iter().max()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ToyRules;

impl PlayRules for ToyRules {
    fn admits(&self, observation: &Observation, candidate: &[Card]) -> bool {
        toy_admits(&observation.last_cards_played, candidate)
    }
}

enum Deal {
    Seeded(u64),
    Fixed { hands: [Vec<Card>; SEAT_COUNT], start: SeatId },
}

/// Native engine following the toy rules.
pub struct ToyEngine {
    deal: Deal,
    hands: [Vec<Card>; SEAT_COUNT],
    current: SeatId,
    last: Vec<Card>,
    last_player: Option<SeatId>,
    ledger: Rc<Ledger>,
}

impl ToyEngine {
    /// Shuffled deal; the holder of 3♦ starts.
    pub fn seeded(seed: u64, ledger: Rc<Ledger>) -> Self {
        Self::with_deal(Deal::Seeded(seed), ledger)
    }

    pub fn fixed(hands: [Vec<Card>; SEAT_COUNT], start: u8, ledger: Rc<Ledger>) -> Self {
        let start = SeatId::new(start).expect("seat in range");
        Self::with_deal(Deal::Fixed { hands, start }, ledger)
    }

    fn with_deal(deal: Deal, ledger: Rc<Ledger>) -> Self {
        Self {
            deal,
            hands: Default::default(),
            current: SeatId::default(),
            last: Vec::new(),
            last_player: None,
            ledger,
        }
    }

    pub fn hand(&self, seat: u8) -> &[Card] {
        &self.hands[usize::from(seat)]
    }

    fn view(&self, seat: SeatId) -> TrackedObservation {
        bump(&self.ledger.acquired);
        let mut hand = self.hands[seat.index()].clone();
        hand.sort_unstable();
        let mut counts = [0u8; 3];
        let mut other = seat;
        for count in &mut counts {
            other = other.next();
            *count = self.hands[other.index()].len() as u8;
        }
        TrackedObservation {
            observation: Observation {
                current_player: self.current,
                your_hand: hand,
                last_cards_played: self.last.clone(),
                num_cards_per_opponent: counts,
            },
            ledger: Rc::clone(&self.ledger),
            released: false,
        }
    }

    fn holds_all(&self, seat: SeatId, cards: &[Card]) -> bool {
        let hand = &self.hands[seat.index()];
        cards.iter().enumerate().all(|(i, card)| hand.contains(card) && !cards[..i].contains(card))
    }
}

impl RuleEngine for ToyEngine {
    type Observation = TrackedObservation;

    fn reset(&mut self) -> TableResult<TrackedObservation> {
        match &self.deal {
            Deal::Seeded(seed) => {
                let mut deck: Vec<Card> = Card::deck().collect();
                deck.shuffle(&mut ChaCha8Rng::seed_from_u64(*seed));
                for (seat, hand) in self.hands.iter_mut().enumerate() {
                    *hand = deck[seat * 13..(seat + 1) * 13].to_vec();
                }
                let three = Card::new(Rank::Three, Suit::Diamond);
                let starter = self.hands.iter().position(|hand| hand.contains(&three)).unwrap_or(0);
                self.current = SeatId::new(starter as u8).expect("seat in range");
            }
            Deal::Fixed { hands, start } => {
                self.hands = hands.clone();
                self.current = *start;
            }
        }
        self.last.clear();
        self.last_player = None;
        Ok(self.view(self.current))
    }

    fn step(&mut self, action: &Action) -> TableResult<StepOutcome<TrackedObservation>> {
        bump(&self.ledger.steps);
        let actor = self.current;
        let cards = action.cards.as_slice();

        if !self.holds_all(actor, cards) || !toy_admits(&self.last, cards) {
            bump(&self.ledger.rejected);
            return Ok(StepOutcome::continuing(self.view(actor)));
        }

        if !cards.is_empty() {
            self.hands[actor.index()].retain(|card| !cards.contains(card));
            self.last = cards.to_vec();
            self.last_player = Some(actor);
            if self.hands[actor.index()].is_empty() {
                return Ok(StepOutcome::finished(self.view(actor)));
            }
        }

        self.current = actor.next();
        if Some(self.current) == self.last_player {
            self.last.clear();
        }
        Ok(StepOutcome::continuing(self.view(actor)))
    }

    fn current_player_obs(&mut self) -> TableResult<TrackedObservation> {
        Ok(self.view(self.current))
    }

    fn player_obs(&mut self, seat: SeatId) -> TableResult<TrackedObservation> {
        Ok(self.view(seat))
    }
}

impl Release for ToyEngine {
    fn release(&mut self) -> Result<(), ReleaseError> {
        bump(&self.ledger.engine_released);
        Ok(())
    }
}

/// Plays whenever it can: every category scores zero except pass.
pub struct PreferPlay {
    ledger: Rc<Ledger>,
}

impl PreferPlay {
    pub fn new(ledger: Rc<Ledger>) -> Self {
        Self { ledger }
    }
}

impl PolicyModel for PreferPlay {
    fn predict(&self, _features: &Tensor) -> TableResult<ModelOutput> {
        let mut logits = vec![0.0; big2_table::ACTION_SPACE_SIZE];
        logits[0] = -1.0;
        Ok(vec![Tensor::row(logits)])
    }
}

impl Release for PreferPlay {
    fn release(&mut self) -> Result<(), ReleaseError> {
        bump(&self.ledger.model_released);
        Ok(())
    }
}

pub fn card(symbol: &str) -> Card {
    symbol.parse().expect("valid card symbol")
}

pub fn cards(symbols: &[&str]) -> Vec<Card> {
    symbols.iter().map(|s| card(s)).collect()
}

/// Thirteen cards of one suit.
pub fn suit_hand(suit: Suit) -> Vec<Card> {
    Rank::ALL.iter().map(|&rank| Card::new(rank, suit)).collect()
}

/// Seat 0 holds diamonds, 1 clubs, 2 hearts, 3 spades.
pub fn suited_hands() -> [Vec<Card>; SEAT_COUNT] {
    [
        suit_hand(Suit::Diamond),
        suit_hand(Suit::Club),
        suit_hand(Suit::Heart),
        suit_hand(Suit::Spade),
    ]
}

pub fn table<M: PolicyModel>(
    engine: ToyEngine,
    model: M,
    config: TableConfig,
) -> TurnOrchestrator<ToyEngine, M> {
    let session = Session::new(engine, model, Codec::with_rules(ToyRules));
    TurnOrchestrator::new(session, config).expect("valid config")
}

/// Local strategy: lead the lowest card, otherwise beat a single cheaply or pass.
pub fn simple_local_move(observation: &Observation) -> Vec<Card> {
    let hand = observation.sorted_hand();
    match observation.last_cards_played.as_slice() {
        [] => hand.first().copied().into_iter().collect(),
        [single] => hand.iter().find(|card| *card > single).copied().into_iter().collect(),
        _ => Vec::new(),
    }
}
