//! The full recomputation pass.
//!
//! Hosts call [`recompute`] once when the data arrives and again after
//! every weight change. Nothing is cached between calls: each pass
//! rebuilds the rank tables, scores and boundaries from the raw
//! collection, which is only ever read.

use geojson::FeatureCollection;
use serde_json::Value;
use tlbi_map_index_models::{
    Breakpoints, IndexDefinition, LegendEntry, NormalizedWeights, StyleOutput, Weights,
};

use crate::composite::{compute_scores, score_collection};
use crate::input::area_records;
use crate::jenks::natural_breaks;
use crate::style::{legend, step_expression};
use crate::weights::normalize_weights;

/// Everything one pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputation {
    /// The weights actually applied.
    pub weights: NormalizedWeights,
    /// Copy of the raw collection with the score property set on every
    /// feature.
    pub features: FeatureCollection,
    /// Composite score per feature, in feature order.
    pub scores: Vec<Option<f64>>,
    /// Natural-breaks class boundaries over the defined scores.
    pub breaks: Breakpoints,
    /// Stepped fill-color expression (or the fallback color).
    pub fill_color: Value,
    /// Legend rows, one per class.
    pub legend: Vec<LegendEntry>,
    property: String,
}

impl Recomputation {
    /// Number of features that received a score.
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    /// Number of features per class, lowest class first.
    #[must_use]
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.breaks.class_count()];
        for class in self
            .scores
            .iter()
            .filter_map(|score| self.breaks.class_of(*score))
        {
            counts[class] += 1;
        }
        counts
    }

    /// The classification output for the rendering layer.
    #[must_use]
    pub fn style_output(&self) -> StyleOutput {
        StyleOutput {
            property: self.property.clone(),
            breaks: self.breaks.clone(),
            fill_color: self.fill_color.clone(),
            legend: self.legend.clone(),
        }
    }
}

/// Runs normalize, score and classify over the raw collection.
#[must_use]
pub fn recompute(
    raw: &FeatureCollection,
    weights: &Weights,
    definition: &IndexDefinition,
) -> Recomputation {
    let normalized = normalize_weights(weights);
    let records = area_records(raw, &definition.fields, definition.id_property.as_deref());
    let scores = compute_scores(&records, &normalized);
    let features = score_collection(raw, &scores, &definition.score_property);
    let breaks = natural_breaks(&scores, definition.class_count);
    let fill_color = step_expression(
        &definition.score_property,
        &breaks,
        &definition.palette,
        &definition.fallback_color,
    );
    let legend = legend(&breaks, &definition.palette);

    log::debug!(
        "Recomputed '{}' with {normalized:?}: {}/{} areas scored, breaks {:?}",
        definition.id,
        scores.iter().filter(|s| s.is_some()).count(),
        scores.len(),
        breaks.values()
    );

    Recomputation {
        weights: normalized,
        features,
        scores,
        breaks,
        fill_color,
        legend,
        property: definition.score_property.clone(),
    }
}
