//! Masked argmax over model logits.

use tracing::{error, event, warn, Level};

use crate::codec::{ActionMask, CategoryId};
use crate::core::{TableError, TableResult};
use crate::nn::{PolicyModel, Tensor};

/// Pick the highest-scoring legal category.
///
/// Logits of illegal categories are pushed down by `penalty`, then the
/// maximum over the legal categories wins, ties going to the lowest index.
/// Illegal categories are never candidates, so no logit can outweigh the
/// mask whatever the penalty; a penalty too small to dominate is logged at
/// warn. NaN logits never win against a number. The
/// winner is checked against the mask once more, so a decision that reaches
/// the engine is always legal.
pub fn select_action<M: PolicyModel + ?Sized>(
    model: &M,
    features: &Tensor,
    mask: &ActionMask,
    penalty: f32,
) -> TableResult<CategoryId> {
    if !mask.any_legal() {
        error!(
            target: "big2_table::policy",
            categories = mask.len(),
            "no legal category to choose from"
        );
        return Err(TableError::EmptyMask);
    }

    let outputs = model.predict(features)?;
    let logits = outputs
        .first()
        .ok_or_else(|| TableError::Model("model returned no outputs".to_string()))?;
    if logits.len() != mask.len() {
        return Err(TableError::LogitShape {
            expected: mask.len(),
            got: logits.len(),
        });
    }

    let Argmax {
        category,
        score,
        best_illegal,
    } = masked_argmax(&logits.data, mask.as_slice(), penalty).ok_or(TableError::EmptyMask)?;
    if best_illegal >= score {
        warn!(
            target: "big2_table::policy",
            penalty,
            best_illegal,
            chosen = score,
            "illegal logit outweighs the penalty"
        );
    }

    if !mask.is_legal(category) {
        error!(target: "big2_table::policy", %category, "argmax landed on an illegal category");
        return Err(TableError::IllegalDecision {
            category: category.index(),
        });
    }

    event!(
        target: "big2_table::policy",
        Level::DEBUG,
        %category,
        legal = mask.legal_count(),
        logit = logits.data[category.index()],
        "category selected"
    );
    Ok(category)
}

/// Winner of a masked argmax, plus the best illegal score it was held against.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Argmax {
    category: CategoryId,
    score: f32,
    best_illegal: f32,
}

/// Largest logit among legal entries, `None` when nothing is legal.
/// `logits` and `legal` have equal length.
fn masked_argmax(logits: &[f32], legal: &[bool], penalty: f32) -> Option<Argmax> {
    let mut best: Option<(usize, f32)> = None;
    let mut best_illegal = f32::NEG_INFINITY;

    for (i, (&logit, &is_legal)) in logits.iter().zip(legal).enumerate() {
        let logit = if logit.is_nan() { f32::NEG_INFINITY } else { logit };
        if !is_legal {
            best_illegal = best_illegal.max(logit - penalty);
            continue;
        }
        if best.map_or(true, |(_, score)| logit > score) {
            best = Some((i, logit));
        }
    }

    best.map(|(i, score)| Argmax {
        category: CategoryId(i as u16),
        score,
        best_illegal,
    })
}
