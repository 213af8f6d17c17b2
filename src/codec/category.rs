//! The fixed categorical action space.
//!
//! A category is a set of positions ("slots") in the acting seat's sorted
//! hand rather than a set of specific cards, so one space of 1365 categories
//! covers every possible hand:
//!
//! | Range | Shape | Count |
//! |---|---|---|
//! | 0 | pass | 1 |
//! | 1..14 | single, any slot | 13 |
//! | 14..47 | pair, slots at most 3 apart | 33 |
//! | 47..78 | triple, spanning at most 4 slots | 31 |
//! | 78..1365 | any five slots | 1287 |
//!
//! Equal ranks sit next to each other in a sorted hand and a rank has at most
//! four suits, so pairs and triples never need a wider span.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Action, Card, MAX_HAND_SIZE};
use crate::guard::{Release, ReleaseError};

/// Number of hand positions a category can address.
pub const HAND_SLOTS: usize = MAX_HAND_SIZE;

/// Size of the category space.
pub const ACTION_SPACE_SIZE: usize = 1 + 13 + 33 + 31 + 1287;

/// Widest slot span allowed for pairs and triples.
const SAME_RANK_SPAN: usize = 3;

/// Index into the category space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

impl CategoryId {
    /// The pass category.
    pub const PASS: CategoryId = CategoryId(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bitmask over the 13 slots of a sorted hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotSet(u16);

impl SlotSet {
    /// The empty set (a pass).
    pub const EMPTY: SlotSet = SlotSet(0);

    /// Build from slot positions. Positions outside `0..13` are ignored.
    #[must_use]
    pub fn from_slots(slots: &[usize]) -> Self {
        let bits = slots
            .iter()
            .filter(|&&slot| slot < HAND_SLOTS)
            .fold(0u16, |bits, &slot| bits | (1 << slot));
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        slot < HAND_SLOTS && self.0 & (1 << slot) != 0
    }

    /// Selected slots, lowest first.
    pub fn slots(self) -> impl Iterator<Item = usize> {
        (0..HAND_SLOTS).filter(move |&slot| self.contains(slot))
    }

    /// True when every selected slot exists in a hand of `hand_len` cards.
    #[must_use]
    pub fn fits(self, hand_len: usize) -> bool {
        self.slots().all(|slot| slot < hand_len)
    }

    /// Pick the cards at the selected slots of `sorted_hand`.
    ///
    /// Slots past the end of the hand are skipped, so the result only ever
    /// holds cards the seat actually owns.
    #[must_use]
    pub fn resolve(self, sorted_hand: &[Card]) -> Action {
        self.slots()
            .filter_map(|slot| sorted_hand.get(slot).copied())
            .collect()
    }
}

/// Bidirectional map between categories and slot sets.
///
/// Built once per session. Law: for every category `c`,
/// `action_to_category(category_to_action(c)) == Some(c)`.
#[derive(Clone, Debug)]
pub struct CategoryMaps {
    to_action: Vec<SlotSet>,
    to_category: FxHashMap<SlotSet, CategoryId>,
}

impl CategoryMaps {
    /// Enumerate the category space.
    pub fn build() -> Self {
        let mut to_action = Vec::with_capacity(ACTION_SPACE_SIZE);
        to_action.push(SlotSet::EMPTY);

        for i in 0..HAND_SLOTS {
            to_action.push(SlotSet::from_slots(&[i]));
        }
        for i in 0..HAND_SLOTS {
            for j in (i + 1)..HAND_SLOTS.min(i + SAME_RANK_SPAN + 1) {
                to_action.push(SlotSet::from_slots(&[i, j]));
            }
        }
        for i in 0..HAND_SLOTS {
            let end = HAND_SLOTS.min(i + SAME_RANK_SPAN + 1);
            for j in (i + 1)..end {
                for k in (j + 1)..end {
                    to_action.push(SlotSet::from_slots(&[i, j, k]));
                }
            }
        }
        let mut five = Vec::with_capacity(5);
        push_combinations(0, 5, &mut five, &mut to_action);

        debug_assert_eq!(to_action.len(), ACTION_SPACE_SIZE);

        let to_category = to_action
            .iter()
            .enumerate()
            .map(|(i, &slots)| (slots, CategoryId(i as u16)))
            .collect();

        Self {
            to_action,
            to_category,
        }
    }

    /// Number of categories. Zero once released.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_action.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_action.is_empty()
    }

    /// Slot set behind a category.
    #[must_use]
    pub fn category_to_action(&self, category: CategoryId) -> Option<SlotSet> {
        self.to_action.get(category.index()).copied()
    }

    /// Category for a slot set, if the set is one of the enumerated shapes.
    #[must_use]
    pub fn action_to_category(&self, slots: SlotSet) -> Option<CategoryId> {
        self.to_category.get(&slots).copied()
    }

    /// Express concrete cards as a category relative to `hand`.
    ///
    /// Returns `None` when a card is not in the hand or the shape is not part
    /// of the space (e.g. four cards).
    #[must_use]
    pub fn category_for(&self, hand: &[Card], action: &Action) -> Option<CategoryId> {
        let mut sorted = hand.to_vec();
        sorted.sort_unstable();
        let slots = action
            .iter()
            .map(|card| sorted.binary_search(card).ok())
            .collect::<Option<Vec<_>>>()?;
        self.action_to_category(SlotSet::from_slots(&slots))
    }

    /// Iterate `(category, slots)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, SlotSet)> + '_ {
        self.to_action
            .iter()
            .enumerate()
            .map(|(i, &slots)| (CategoryId(i as u16), slots))
    }
}

impl Release for CategoryMaps {
    fn release(&mut self) -> Result<(), ReleaseError> {
        self.to_action = Vec::new();
        self.to_category = FxHashMap::default();
        Ok(())
    }
}

fn push_combinations(
    start: usize,
    remaining: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<SlotSet>,
) {
    if remaining == 0 {
        out.push(SlotSet::from_slots(current));
        return;
    }
    for slot in start..=(HAND_SLOTS - remaining) {
        current.push(slot);
        push_combinations(slot + 1, remaining - 1, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_space_size_and_layout() {
        let maps = CategoryMaps::build();
        assert_eq!(maps.len(), ACTION_SPACE_SIZE);
        assert_eq!(maps.len(), 1365);

        let sizes: Vec<usize> = maps.iter().map(|(_, slots)| slots.len()).collect();
        assert_eq!(sizes[0], 0);
        assert!(sizes[1..14].iter().all(|&n| n == 1));
        assert!(sizes[14..47].iter().all(|&n| n == 2));
        assert!(sizes[47..78].iter().all(|&n| n == 3));
        assert!(sizes[78..].iter().all(|&n| n == 5));
    }

    #[test]
    fn test_round_trip_every_category() {
        let maps = CategoryMaps::build();
        for (category, slots) in maps.iter() {
            assert_eq!(maps.category_to_action(category), Some(slots));
            assert_eq!(maps.action_to_category(slots), Some(category));
        }
    }

    #[test]
    fn test_pairs_stay_within_span() {
        let maps = CategoryMaps::build();
        assert!(maps.action_to_category(SlotSet::from_slots(&[0, 3])).is_some());
        assert!(maps.action_to_category(SlotSet::from_slots(&[0, 4])).is_none());
        assert!(maps.action_to_category(SlotSet::from_slots(&[9, 10, 12])).is_some());
        assert!(maps.action_to_category(SlotSet::from_slots(&[8, 10, 12])).is_none());
        assert!(maps.action_to_category(SlotSet::from_slots(&[0, 1, 2, 3])).is_none());
    }

    #[test]
    fn test_slot_set_basics() {
        let slots = SlotSet::from_slots(&[4, 1, 12, 13]);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.slots().collect::<Vec<_>>(), vec![1, 4, 12]);
        assert!(slots.contains(12));
        assert!(!slots.contains(13));
        assert!(slots.fits(13));
        assert!(!slots.fits(12));
        assert!(SlotSet::EMPTY.is_empty());
    }

    #[test]
    fn test_resolve_skips_missing_slots() {
        let hand = vec![card("3♦"), card("5♣"), card("9♥")];
        let action = SlotSet::from_slots(&[0, 2, 7]).resolve(&hand);
        assert_eq!(action, Action::from_cards(&[card("3♦"), card("9♥")]));
        assert!(SlotSet::EMPTY.resolve(&hand).is_pass());
    }

    #[test]
    fn test_category_for_cards() {
        let maps = CategoryMaps::build();
        let hand = vec![card("K♠"), card("3♦"), card("3♠"), card("9♥")];

        // Sorted: 3♦ 3♠ 9♥ K♠
        let pair = Action::from_cards(&[card("3♠"), card("3♦")]);
        let category = maps.category_for(&hand, &pair).unwrap();
        assert_eq!(maps.category_to_action(category), Some(SlotSet::from_slots(&[0, 1])));

        assert_eq!(maps.category_for(&hand, &Action::pass()), Some(CategoryId::PASS));
        assert_eq!(maps.category_for(&hand, &Action::from_cards(&[card("2♠")])), None);
    }

    #[test]
    fn test_release_empties_maps() {
        let mut maps = CategoryMaps::build();
        maps.release().unwrap();
        assert!(maps.is_empty());
        assert_eq!(maps.category_to_action(CategoryId(1)), None);
        assert!(maps.release().is_ok());
    }
}
