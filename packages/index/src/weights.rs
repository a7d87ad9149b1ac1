//! Weight normalization.

use tlbi_map_index_models::{NormalizedWeights, Weights};

/// Rescales raw weights so they sum to 1.
///
/// A sum of exactly zero (or a NaN sum) is replaced by 1, so an all-zero
/// weight vector stays all zero and every scored area ends up with a
/// composite of 0 rather than a division error. Negative weights are
/// not rejected.
#[must_use]
pub fn normalize_weights(weights: &Weights) -> NormalizedWeights {
    let raw_sum = weights.economic_burden
        + weights.park_access
        + weights.food_access
        + weights.commute_burden;

    let sum = if raw_sum == 0.0 || raw_sum.is_nan() {
        1.0
    } else {
        raw_sum
    };

    log::trace!("normalizing weights {weights:?} by {sum}");

    NormalizedWeights {
        economic_burden: weights.economic_burden / sum,
        park_access: weights.park_access / sum,
        food_access: weights.food_access / sum,
        commute_burden: weights.commute_burden / sum,
    }
}
