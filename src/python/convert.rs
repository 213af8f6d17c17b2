//! Conversions between guest-runtime values and table types.
//!
//! Cards arrive either as `(rank, suit)` pairs or as objects with `rank` and
//! `suit` attributes; each of those may be a plain string or an enum member
//! whose `value` is the string. Observations arrive as objects or dicts with
//! the four observation fields.

use numpy::{PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};

use crate::core::{
    Card, Observation, SeatId, TableError, TableResult, MAX_HAND_SIZE, OPPONENT_COUNT,
};
use crate::nn::{ModelOutput, Tensor};

impl From<PyErr> for TableError {
    fn from(err: PyErr) -> Self {
        TableError::Boundary(err.to_string())
    }
}

fn symbol(value: &Bound<'_, PyAny>) -> PyResult<String> {
    match value.extract::<String>() {
        Ok(symbol) => Ok(symbol),
        Err(_) => value.getattr("value")?.extract(),
    }
}

pub(crate) fn card_from_py(value: &Bound<'_, PyAny>) -> TableResult<Card> {
    let (rank, suit) = match value.extract::<(Bound<'_, PyAny>, Bound<'_, PyAny>)>() {
        Ok(pair) => pair,
        Err(_) => (value.getattr("rank")?, value.getattr("suit")?),
    };
    Ok(Card::from_symbols(&symbol(&rank)?, &symbol(&suit)?)?)
}

/// Cards in guest form. `factory(rank, suit)` builds each card when given,
/// otherwise cards cross as `(rank, suit)` tuples.
pub(crate) fn cards_to_py<'py>(
    py: Python<'py>,
    cards: &[Card],
    factory: Option<&Py<PyAny>>,
) -> PyResult<Bound<'py, PyList>> {
    let items = cards
        .iter()
        .map(|card| {
            let rank = card.rank.symbol();
            let suit = card.suit.symbol();
            match factory {
                Some(factory) => factory.bind(py).call1((rank, suit)),
                None => Ok(PyTuple::new_bound(py, [rank, suit]).into_any()),
            }
        })
        .collect::<PyResult<Vec<_>>>()?;
    Ok(PyList::new_bound(py, items))
}

fn field<'py>(value: &Bound<'py, PyAny>, name: &str) -> PyResult<Bound<'py, PyAny>> {
    match value.downcast::<PyDict>() {
        Ok(dict) => dict
            .get_item(name)?
            .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string())),
        Err(_) => value.getattr(name),
    }
}

fn cards_field(value: &Bound<'_, PyAny>, name: &str) -> TableResult<Vec<Card>> {
    field(value, name)?
        .iter()?
        .map(|item| card_from_py(&item?))
        .collect()
}

pub(crate) fn observation_from_py(value: &Bound<'_, PyAny>) -> TableResult<Observation> {
    let current_player = SeatId::try_from(field(value, "current_player")?.extract::<i64>()?)?;

    let counts: Vec<i64> = field(value, "num_cards_per_opponent")?.extract()?;
    if counts.len() != OPPONENT_COUNT {
        return Err(TableError::MalformedObservation(format!(
            "expected {OPPONENT_COUNT} opponent counts, got {}",
            counts.len()
        )));
    }
    let mut num_cards_per_opponent = [0u8; OPPONENT_COUNT];
    for (slot, &count) in num_cards_per_opponent.iter_mut().zip(&counts) {
        *slot = u8::try_from(count)
            .ok()
            .filter(|&count| usize::from(count) <= MAX_HAND_SIZE)
            .ok_or_else(|| TableError::MalformedObservation(format!("opponent count {count}")))?;
    }

    let observation = Observation {
        current_player,
        your_hand: cards_field(value, "your_hand")?,
        last_cards_played: cards_field(value, "last_cards_played")?,
        num_cards_per_opponent,
    };
    observation.validate()?;
    Ok(observation)
}

/// Observation as a dict with the same four fields the engine provides.
pub(crate) fn observation_to_py<'py>(
    py: Python<'py>,
    observation: &Observation,
    factory: Option<&Py<PyAny>>,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("current_player", observation.current_player.index())?;
    dict.set_item("your_hand", cards_to_py(py, &observation.your_hand, factory)?)?;
    dict.set_item(
        "last_cards_played",
        cards_to_py(py, &observation.last_cards_played, factory)?,
    )?;
    dict.set_item("num_cards_per_opponent", observation.num_cards_per_opponent.to_vec())?;
    Ok(dict)
}

fn tensor_from_py(value: &Bound<'_, PyAny>) -> TableResult<Tensor> {
    if let Ok(array) = value.extract::<PyReadonlyArrayDyn<'_, f32>>() {
        return Ok(Tensor::new(array.as_array().iter().copied().collect(), array.shape().to_vec()));
    }
    if let Ok(array) = value.extract::<PyReadonlyArrayDyn<'_, f64>>() {
        let data = array.as_array().iter().map(|&v| v as f32).collect();
        return Ok(Tensor::new(data, array.shape().to_vec()));
    }
    if let Ok(row) = value.extract::<Vec<f32>>() {
        return Ok(Tensor::row(row));
    }
    Err(TableError::Model(format!(
        "unsupported model output of type {}",
        value.get_type().name()?
    )))
}

/// Model output: one array, or a list/tuple whose entries are arrays.
pub(crate) fn outputs_from_py(value: &Bound<'_, PyAny>) -> TableResult<ModelOutput> {
    if let Ok(tensor) = tensor_from_py(value) {
        return Ok(vec![tensor]);
    }
    let items: Vec<Bound<'_, PyAny>> = if let Ok(list) = value.downcast::<PyList>() {
        list.iter().collect()
    } else if let Ok(tuple) = value.downcast::<PyTuple>() {
        tuple.iter().collect()
    } else {
        return Err(TableError::Model("model output is not an array or sequence".to_string()));
    };
    items.iter().map(tensor_from_py).collect()
}
