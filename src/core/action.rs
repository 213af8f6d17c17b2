//! Concrete actions: the cards a seat puts on the table.
//!
//! An action is an ordered set of 0-13 cards. The empty action is a pass.
//! The engine is the only judge of whether a given action is a legal
//! combination; this type carries no rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;

/// A concrete action.
///
/// ## Example
///
/// ```
/// use big2_table::core::{Action, Card};
///
/// let pass = Action::pass();
/// assert!(pass.is_pass());
///
/// let pair = Action::from_cards(&["7♦".parse::<Card>().unwrap(), "7♠".parse().unwrap()]);
/// assert_eq!(pair.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Cards in play order.
    /// SmallVec covers singles through five-card hands without heap allocation.
    pub cards: SmallVec<[Card; 5]>,
}

impl Action {
    /// The pass action.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// Create an action from the given cards, preserving their order.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: SmallVec::from_slice(cards),
        }
    }

    /// Check if this action is a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Same as `is_pass`, for collection-style callers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl FromIterator<Card> for Action {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pass() {
            return f.write_str("pass");
        }
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
