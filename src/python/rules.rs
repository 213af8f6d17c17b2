//! Legality checks delegated to the engine package's Python helper.

use pyo3::prelude::*;

use crate::core::{Card, Observation};
use crate::rules::PlayRules;

use super::convert::{cards_to_py, observation_to_py};

/// Calls `admits(observation, cards) -> bool` for every candidate.
///
/// The observation is passed as a dict and cards as `(rank, suit)` tuples
/// unless a card factory is set. A call that raises counts as "not admitted".
pub struct PyPlayRules {
    admits: PyObject,
    card_factory: Option<PyObject>,
}

impl PyPlayRules {
    pub fn new(admits: PyObject) -> Self {
        Self {
            admits,
            card_factory: None,
        }
    }

    pub fn with_card_factory(mut self, factory: PyObject) -> Self {
        self.card_factory = Some(factory);
        self
    }
}

impl PlayRules for PyPlayRules {
    fn admits(&self, observation: &Observation, candidate: &[Card]) -> bool {
        let factory = self.card_factory.as_ref();
        let result = Python::with_gil(|py| -> PyResult<bool> {
            let obs = observation_to_py(py, observation, factory)?;
            let cards = cards_to_py(py, candidate, factory)?;
            self.admits.bind(py).call1((obs, cards))?.is_truthy()
        });
        result.unwrap_or_else(|err| {
            tracing::warn!(target: "big2_table::python", error = %err, "legality check raised");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeatId;

    #[test]
    fn test_python_rules() {
        let admits = Python::with_gil(|py| {
            let module = PyModule::from_code_bound(
                py,
                concat!(
                    "def admits(obs, cards):\n",
                    "    if obs['current_player'] == 3:\n",
                    "        raise ValueError('boom')\n",
                    "    return len(cards) == 1\n",
                ),
                "rules.py",
                "rules",
            )
            .unwrap();
            module.getattr("admits").unwrap().unbind()
        });
        let rules = PyPlayRules::new(admits);
        let mut obs = Observation {
            current_player: SeatId::new(0).unwrap(),
            your_hand: vec!["4♥".parse().unwrap()],
            last_cards_played: vec![],
            num_cards_per_opponent: [1, 1, 1],
        };

        assert!(rules.admits(&obs, &obs.your_hand));
        assert!(!rules.admits(&obs, &[]));

        obs.current_player = SeatId::new(3).unwrap();
        assert!(!rules.admits(&obs, &obs.your_hand));
    }
}
