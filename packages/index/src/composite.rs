//! Composite score calculation.
//!
//! Each indicator is quantile-ranked across all areas, then the four
//! ranks are blended with the normalized weights into one score per area.
//! An area whose primary indicator is missing gets no score. A missing
//! secondary indicator contributes 0 while its weight still counts, so
//! such areas score lower than they would with the weights re-spread.

use geojson::{Feature, FeatureCollection, JsonValue};
use tlbi_map_index_models::{AreaRecord, Indicator, NormalizedWeights};

use crate::quantile::QuantileTable;

/// One quantile table per indicator, in [`Indicator::ALL`] order.
#[derive(Debug, Clone)]
pub struct IndicatorTables {
    tables: [QuantileTable; 4],
}

impl IndicatorTables {
    /// Builds every indicator's table from the full set of areas.
    #[must_use]
    pub fn build(records: &[AreaRecord]) -> Self {
        Self {
            tables: Indicator::ALL.map(|indicator| {
                QuantileTable::from_options(records.iter().map(|r| r.value(indicator)))
            }),
        }
    }

    /// Returns the table for `indicator`.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> &QuantileTable {
        &self.tables[indicator as usize]
    }
}

/// Computes the composite score of every area, in input order.
#[must_use]
pub fn compute_scores(records: &[AreaRecord], weights: &NormalizedWeights) -> Vec<Option<f64>> {
    let tables = IndicatorTables::build(records);
    records
        .iter()
        .map(|record| composite_score(record, &tables, weights))
        .collect()
}

/// Blends one area's ranks into its composite score.
///
/// Returns `None` when the primary indicator is missing or NaN.
#[must_use]
pub fn composite_score(
    record: &AreaRecord,
    tables: &IndicatorTables,
    weights: &NormalizedWeights,
) -> Option<f64> {
    let primary_present = Indicator::ALL
        .into_iter()
        .filter(|indicator| indicator.is_primary())
        .all(|indicator| record.value(indicator).is_some_and(|v| !v.is_nan()));
    if !primary_present {
        return None;
    }

    // Fixed left-to-right order keeps results bit-identical across runs.
    Some(Indicator::ALL.iter().fold(0.0, |acc, &indicator| {
        let rank = tables
            .get(indicator)
            .rank_option(record.value(indicator))
            .unwrap_or(0.0);
        acc + rank * weights.get(indicator)
    }))
}

/// Builds a new feature collection with `property` set on every feature.
///
/// Scores are matched to features by position. Missing or non-finite
/// scores are written as JSON `null`. Geometry, ids and all other
/// properties are carried over unchanged; `raw` itself is not touched.
#[must_use]
pub fn score_collection(
    raw: &FeatureCollection,
    scores: &[Option<f64>],
    property: &str,
) -> FeatureCollection {
    FeatureCollection {
        bbox: raw.bbox.clone(),
        features: raw
            .features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                scored_feature(feature, property, scores.get(i).copied().flatten())
            })
            .collect(),
        foreign_members: raw.foreign_members.clone(),
    }
}

fn scored_feature(feature: &Feature, property: &str, score: Option<f64>) -> Feature {
    let mut properties = feature.properties.clone().unwrap_or_default();
    properties.insert(property.to_string(), score_value(score));

    Feature {
        bbox: feature.bbox.clone(),
        geometry: feature.geometry.clone(),
        id: feature.id.clone(),
        properties: Some(properties),
        foreign_members: feature.foreign_members.clone(),
    }
}

fn score_value(score: Option<f64>) -> JsonValue {
    score
        .and_then(serde_json::Number::from_f64)
        .map_or(JsonValue::Null, JsonValue::Number)
}
