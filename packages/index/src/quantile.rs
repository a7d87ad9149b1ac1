//! Per-indicator quantile rank tables.
//!
//! A [`QuantileTable`] holds one indicator's values across every area,
//! sorted ascending, and maps a value to its position fraction in
//! `[0, 1]`. Tables are rebuilt from scratch on every pass.

/// Sorted reference values for one indicator.
///
/// Missing values are kept as NaN so the table length always equals the
/// number of areas. NaN sorts after every number (`f64::total_cmp`),
/// which means a finite value can never land on a missing slot.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileTable {
    sorted: Vec<f64>,
}

impl QuantileTable {
    /// Builds a table from one value per area (NaN for missing).
    #[must_use]
    pub fn new(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self { sorted: values }
    }

    /// Builds a table from optional values, mapping `None` to NaN.
    #[must_use]
    pub fn from_options(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Number of reference values, missing ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the table has no reference values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The sorted reference values.
    #[must_use]
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// Position fraction of `value` within the table.
    ///
    /// Uses the first index whose reference value is `>= value`, or the
    /// last index when `value` exceeds every reference value, divided by
    /// `len - 1`. Ties resolve to their first occurrence, so repeated
    /// values share the lowest rank of their run.
    ///
    /// Returns `None` for a NaN `value` or an empty table. A table with a
    /// single value ranks everything at `0.0`.
    #[must_use]
    pub fn rank(&self, value: f64) -> Option<f64> {
        if value.is_nan() || self.sorted.is_empty() {
            return None;
        }

        let last = self.sorted.len() - 1;
        if last == 0 {
            return Some(0.0);
        }

        let idx = self
            .sorted
            .iter()
            .position(|reference| value <= *reference)
            .unwrap_or(last);

        #[allow(clippy::cast_precision_loss)]
        let fraction = idx as f64 / last as f64;
        Some(fraction)
    }

    /// Rank of an optional value; `None` in gives `None` out.
    #[must_use]
    pub fn rank_option(&self, value: Option<f64>) -> Option<f64> {
        value.and_then(|v| self.rank(v))
    }
}
