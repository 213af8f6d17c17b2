//! Property tests for the codec, the policy and whole games.

mod common;

use std::rc::Rc;

use proptest::prelude::*;
use proptest::sample::subsequence;

use big2_table::codec::{generate_mask, CategoryMaps, ACTION_SPACE_SIZE};
use big2_table::core::{Card, Observation, SeatId, TableConfig};
use big2_table::guard::{Release, ReleaseError};
use big2_table::nn::{ModelOutput, PolicyModel, SeededLogits, Tensor};
use big2_table::policy::select_action;
use big2_table::{ActionMask, CategoryId, TableResult, TurnPhase};

use common::{simple_local_move, table, toy_admits, Ledger, ToyEngine, ToyRules};

struct Fixed(Vec<f32>);

impl PolicyModel for Fixed {
    fn predict(&self, _features: &Tensor) -> TableResult<ModelOutput> {
        Ok(vec![Tensor::row(self.0.clone())])
    }
}

impl Release for Fixed {
    fn release(&mut self) -> Result<(), ReleaseError> {
        Ok(())
    }
}

fn deck() -> Vec<Card> {
    Card::deck().collect()
}

/// A hand from the low half of the deck and a table play from the high half.
fn observation_strategy() -> impl Strategy<Value = Observation> {
    let deck = deck();
    let (low, high) = deck.split_at(26);
    (
        subsequence(low.to_vec(), 0..=13),
        subsequence(high.to_vec(), 0..=5),
        0u8..4,
        prop::array::uniform3(0u8..=13),
    )
        .prop_map(|(hand, last, seat, counts)| Observation {
            current_player: SeatId::new(seat).unwrap(),
            your_hand: hand,
            last_cards_played: last,
            num_cards_per_opponent: counts,
        })
}

#[test]
fn test_category_round_trip_law() {
    let maps = CategoryMaps::build();
    assert_eq!(maps.len(), ACTION_SPACE_SIZE);
    for (category, slots) in maps.iter() {
        let slots_back = maps.category_to_action(category).unwrap();
        assert_eq!(maps.action_to_category(slots_back), Some(category));
        assert_eq!(maps.category_to_action(category), Some(slots));
    }
}

proptest! {
    #[test]
    fn prop_mask_has_a_legal_entry(obs in observation_strategy()) {
        prop_assume!(!obs.your_hand.is_empty());
        let maps = CategoryMaps::build();
        let mask = generate_mask(&maps, &obs, &ToyRules).unwrap();
        prop_assert!(mask.legal_count() >= 1);
    }

    #[test]
    fn prop_mask_only_offers_owned_admitted_cards(obs in observation_strategy()) {
        let maps = CategoryMaps::build();
        let mask = generate_mask(&maps, &obs, &ToyRules).unwrap();
        let hand = obs.sorted_hand();

        for category in mask.iter_legal() {
            let action = maps.category_to_action(category).unwrap().resolve(&hand);
            prop_assert!(action.iter().all(|card| hand.contains(card)));
            prop_assert!(toy_admits(&obs.last_cards_played, &action.cards));
        }
    }

    #[test]
    fn prop_selection_is_legal_and_maximal(
        logits in prop::collection::vec(-100.0f32..100.0, ACTION_SPACE_SIZE),
        legal in prop::collection::vec(any::<bool>(), ACTION_SPACE_SIZE),
    ) {
        prop_assume!(legal.iter().any(|&flag| flag));
        let mask = ActionMask::new(legal);
        let features = Tensor::zeros(vec![1, 4]);

        let chosen = select_action(&Fixed(logits.clone()), &features, &mask, 1e9).unwrap();

        prop_assert!(mask.is_legal(chosen));
        for other in mask.iter_legal() {
            let (a, b) = (logits[chosen.index()], logits[other.index()]);
            prop_assert!(a > b || (a == b && chosen <= other));
        }
    }

    #[test]
    fn prop_decisions_respect_mask_for_any_model(
        obs in observation_strategy(),
        seed in any::<u64>(),
    ) {
        prop_assume!(!obs.your_hand.is_empty());
        let maps = CategoryMaps::build();
        let mask = generate_mask(&maps, &obs, &ToyRules).unwrap();
        let model = SeededLogits::new(ACTION_SPACE_SIZE, seed);
        let features = Tensor::zeros(vec![1, 154]);
        let chosen: CategoryId = select_action(&model, &features, &mask, 1e9).unwrap();
        prop_assert!(mask.is_legal(chosen));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_full_games_keep_table_invariants(deal in any::<u64>(), policy in any::<u64>()) {
        let ledger = Rc::new(Ledger::default());
        let mut table = table(
            ToyEngine::seeded(deal, Rc::clone(&ledger)),
            SeededLogits::new(ACTION_SPACE_SIZE, policy),
            TableConfig::default(),
        );

        let mut view = table.reset().unwrap();
        prop_assert_eq!(view.current_player, table.local_seat());

        let mut finished = false;
        for _ in 0..300 {
            let outcome = table.submit_local_action(&simple_local_move(&view)).unwrap();
            prop_assert!(!outcome.invalid);
            if outcome.done {
                prop_assert!(outcome.local_result().is_some());
                prop_assert_eq!(table.phase(), TurnPhase::Terminal);
                finished = true;
                break;
            }
            prop_assert_eq!(outcome.observation.current_player, table.local_seat());
            prop_assert_eq!(table.phase(), TurnPhase::AwaitingLocal);
            view = outcome.observation;
        }

        prop_assert!(finished);
        prop_assert_eq!(ledger.rejected.get(), 0);
        prop_assert_eq!(ledger.outstanding(), 0);
    }
}
