//! Jenks natural-breaks classification.
//!
//! Partitions the sorted composite scores into contiguous classes that
//! minimize the total within-class sum of squared deviations, using the
//! classic dynamic program over lower-class-limit and
//! variance-combination matrices. Arithmetic follows the widely used
//! `simple-statistics` formulation step for step so boundaries agree
//! with it exactly.

use tlbi_map_index_models::Breakpoints;

/// Number of classes used for the composite score.
pub const DEFAULT_CLASS_COUNT: usize = 6;

/// Computes natural-breaks boundaries for a set of scores.
///
/// Missing and non-finite scores are dropped first. The result is
/// empty when nothing remains and a single value when every remaining
/// score is identical. Otherwise it holds `classes + 1` non-decreasing
/// values: each class's lower bound followed by the maximum, with
/// `classes = min(class_count, distinct scores)`.
///
/// The order of `scores` does not affect the result.
#[must_use]
pub fn natural_breaks(scores: &[Option<f64>], class_count: usize) -> Breakpoints {
    let mut values: Vec<f64> = scores
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if values.is_empty() {
        log::debug!("no finite scores to classify");
        return Breakpoints::default();
    }

    values.sort_by(f64::total_cmp);

    let distinct = distinct_count(&values);
    if distinct == 1 {
        log::debug!("all {} scores identical, nothing to classify", values.len());
        return Breakpoints(vec![values[0]]);
    }

    let mut classes = class_count.clamp(1, distinct);
    loop {
        if let Some(breaks) = jenks(&values, classes) {
            return Breakpoints(breaks);
        }
        // Only reachable when rounding makes a degenerate partition tie
        // with a proper one. One class always succeeds.
        log::debug!("{classes}-class partition degenerate, retrying with fewer");
        classes -= 1;
    }
}

/// Number of distinct values in a sorted slice.
fn distinct_count(sorted: &[f64]) -> usize {
    1 + sorted.windows(2).filter(|w| w[0] < w[1]).count()
}

/// Runs the dynamic program on sorted `data` and walks the lower class
/// limits back into boundaries. Returns `None` if the walk runs out of
/// values before every class has a lower bound.
fn jenks(data: &[f64], classes: usize) -> Option<Vec<f64>> {
    let limits = lower_class_limits(data, classes);

    let mut breaks = vec![0.0; classes + 1];
    breaks[classes] = data[data.len() - 1];

    let mut k = data.len();
    for class in (1..=classes).rev() {
        let lower = limits[k][class];
        if lower == 0 {
            return None;
        }
        breaks[class - 1] = data[lower - 1];
        k = lower - 1;
    }

    Some(breaks)
}

/// Builds the lower-class-limit matrix (1-based, `(n + 1) x (classes + 1)`).
///
/// `limits[l][j]` is the 1-based index of the first value in the last
/// class of the best `j`-class partition of the first `l` values.
fn lower_class_limits(data: &[f64], classes: usize) -> Vec<Vec<usize>> {
    let n = data.len();
    let mut limits = vec![vec![0_usize; classes + 1]; n + 1];
    let mut variance_combinations = vec![vec![0.0_f64; classes + 1]; n + 1];

    for j in 1..=classes {
        limits[1][j] = 1;
        variance_combinations[1][j] = 0.0;
        for row in variance_combinations.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut count = 0.0;
        let mut variance = 0.0;

        for m in 1..=l {
            let lower = l - m + 1;
            let value = data[lower - 1];

            count += 1.0;
            sum += value;
            sum_squares += value * value;
            variance = sum_squares - (sum * sum) / count;

            let before = lower - 1;
            if before != 0 {
                for j in 2..=classes {
                    let candidate = variance + variance_combinations[before][j - 1];
                    if variance_combinations[l][j] >= candidate {
                        limits[l][j] = lower;
                        variance_combinations[l][j] = candidate;
                    }
                }
            }
        }

        limits[l][1] = 1;
        variance_combinations[l][1] = variance;
    }

    limits
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scores(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn keeps_tight_high_pair_together() {
        let breaks = natural_breaks(
            &scores(&[0.1, 0.15, 0.2, 0.5, 0.55, 0.9, 0.95]),
            DEFAULT_CLASS_COUNT,
        );
        assert_eq!(breaks.values(), &[0.1, 0.15, 0.2, 0.5, 0.55, 0.9, 0.95]);
    }

    #[test]
    fn separates_obvious_clusters() {
        let breaks = natural_breaks(
            &scores(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 20.0, 21.0, 22.0]),
            3,
        );
        assert_eq!(breaks.values(), &[1.0, 10.0, 20.0, 22.0]);
    }

    #[test]
    fn matches_reference_on_unsorted_input() {
        let breaks = natural_breaks(&scores(&[3.0, 1.0, 2.0, 1.0, 3.0, 2.0, 5.0, 4.0]), 3);
        assert_eq!(breaks.values(), &[1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn matches_reference_with_repeated_scores() {
        let breaks = natural_breaks(
            &scores(&[0.5, 0.5, 0.5, 0.2, 0.2, 0.9, 0.9, 0.9, 0.1, 0.3, 0.7]),
            6,
        );
        assert_eq!(breaks.values(), &[0.1, 0.2, 0.3, 0.5, 0.7, 0.9, 0.9]);

        let breaks = natural_breaks(
            &scores(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            6,
        );
        assert_eq!(breaks.values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn caps_classes_at_distinct_values() {
        let breaks = natural_breaks(&scores(&[0.0, 0.25, 0.5, 0.5, 0.75, 1.0]), 6);
        assert_eq!(breaks.values(), &[0.0, 0.25, 0.5, 0.75, 1.0, 1.0]);
        assert_eq!(breaks.class_count(), 5);

        let breaks = natural_breaks(&scores(&[0.25, 0.75]), 6);
        assert_eq!(breaks.values(), &[0.25, 0.75, 0.75]);
    }

    #[test]
    fn ties_stay_in_one_class() {
        let breaks = natural_breaks(&scores(&[1.0, 1.0, 1.0, 2.0]), 2);
        assert_eq!(breaks.values(), &[1.0, 2.0, 2.0]);
    }

    #[test]
    fn identical_scores_give_single_boundary() {
        let breaks = natural_breaks(&scores(&[0.5; 7]), 6);
        assert_eq!(breaks.values(), &[0.5]);
        assert!(!breaks.is_classified());
    }

    #[test]
    fn empty_and_all_missing_give_no_boundaries() {
        assert!(natural_breaks(&[], 6).values().is_empty());
        assert!(natural_breaks(&[None, None], 6).values().is_empty());
        assert!(
            natural_breaks(&[Some(f64::NAN), Some(f64::INFINITY), None], 6)
                .values()
                .is_empty()
        );
    }

    #[test]
    fn drops_missing_and_non_finite_scores() {
        let breaks = natural_breaks(
            &[
                None,
                Some(0.0),
                Some(f64::NAN),
                Some(0.5),
                None,
                Some(1.0),
                Some(f64::NEG_INFINITY),
            ],
            2,
        );
        assert_eq!(breaks.values(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn single_class_spans_min_to_max() {
        let breaks = natural_breaks(&scores(&[0.4, 0.1, 0.9]), 1);
        assert_eq!(breaks.values(), &[0.1, 0.9]);
    }

    proptest! {
        #[test]
        fn boundaries_are_ordered_and_span_the_data(
            values in proptest::collection::vec(0.0_f64..=1.0, 1..60),
            class_count in 2_usize..8,
        ) {
            let breaks = natural_breaks(&scores(&values), class_count);
            let b = breaks.values();

            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(!b.is_empty());
            prop_assert!(b.len() <= class_count + 1);
            prop_assert_eq!(b[0], min);
            prop_assert_eq!(b[b.len() - 1], max);
            prop_assert!(b.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn input_order_does_not_matter(
            values in proptest::collection::vec(0.0_f64..=1.0, 1..40),
        ) {
            let mut reversed = values.clone();
            reversed.reverse();
            prop_assert_eq!(
                natural_breaks(&scores(&values), DEFAULT_CLASS_COUNT),
                natural_breaks(&scores(&reversed), DEFAULT_CLASS_COUNT)
            );
        }
    }
}
