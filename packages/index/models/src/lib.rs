#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Indicator, weight, area and classification types for the living
//! burden index.
//!
//! These types carry data between the host application and the index
//! engine. They hold no computation beyond simple accessors; the engine
//! in `tlbi_map_index` owns normalization, ranking and classification.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the four indicators blended into the composite score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Indicator {
    /// Rent to income ratio. Gates whether an area is scored at all.
    EconomicBurden,
    /// Share of the area covered by parks.
    ParkAccess,
    /// Retail food stores per square kilometre.
    FoodAccess,
    /// Average commute time in minutes.
    CommuteBurden,
}

impl Indicator {
    /// All indicators in blend order.
    pub const ALL: [Self; 4] = [
        Self::EconomicBurden,
        Self::ParkAccess,
        Self::FoodAccess,
        Self::CommuteBurden,
    ];

    /// Whether this is the primary indicator.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::EconomicBurden)
    }

    /// Human-readable label used by host UIs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EconomicBurden => "Economic Burden",
            Self::ParkAccess => "Park Access",
            Self::FoodAccess => "Food Access",
            Self::CommuteBurden => "Commute Burden",
        }
    }
}

/// Raw, user-adjustable weights, one per indicator.
///
/// Each weight is expected in `[0, 1]` but nothing enforces that; the
/// normalizer rescales whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Weight of [`Indicator::EconomicBurden`].
    pub economic_burden: f64,
    /// Weight of [`Indicator::ParkAccess`].
    pub park_access: f64,
    /// Weight of [`Indicator::FoodAccess`].
    pub food_access: f64,
    /// Weight of [`Indicator::CommuteBurden`].
    pub commute_burden: f64,
}

impl Weights {
    /// Creates a weight vector in blend order.
    #[must_use]
    pub const fn new(
        economic_burden: f64,
        park_access: f64,
        food_access: f64,
        commute_burden: f64,
    ) -> Self {
        Self {
            economic_burden,
            park_access,
            food_access,
            commute_burden,
        }
    }

    /// Returns the weight for `indicator`.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::EconomicBurden => self.economic_burden,
            Indicator::ParkAccess => self.park_access,
            Indicator::FoodAccess => self.food_access,
            Indicator::CommuteBurden => self.commute_burden,
        }
    }

    /// Replaces the weight for `indicator`.
    pub const fn set(&mut self, indicator: Indicator, value: f64) {
        match indicator {
            Indicator::EconomicBurden => self.economic_burden = value,
            Indicator::ParkAccess => self.park_access = value,
            Indicator::FoodAccess => self.food_access = value,
            Indicator::CommuteBurden => self.commute_burden = value,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.4, 0.2, 0.2, 0.2)
    }
}

/// Weights rescaled to sum to 1 (or the all-zero fallback).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    /// Normalized weight of [`Indicator::EconomicBurden`].
    pub economic_burden: f64,
    /// Normalized weight of [`Indicator::ParkAccess`].
    pub park_access: f64,
    /// Normalized weight of [`Indicator::FoodAccess`].
    pub food_access: f64,
    /// Normalized weight of [`Indicator::CommuteBurden`].
    pub commute_burden: f64,
}

impl NormalizedWeights {
    /// Returns the normalized weight for `indicator`.
    #[must_use]
    pub const fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::EconomicBurden => self.economic_burden,
            Indicator::ParkAccess => self.park_access,
            Indicator::FoodAccess => self.food_access,
            Indicator::CommuteBurden => self.commute_burden,
        }
    }

    /// Sum of the four weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.economic_burden + self.park_access + self.food_access + self.commute_burden
    }
}

/// One geographic unit's indicator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    /// Stable identifier (feature id, configured id property, or index).
    pub id: String,
    /// Rent to income ratio.
    pub economic_burden: Option<f64>,
    /// Park area ratio.
    pub park_access: Option<f64>,
    /// Food store density.
    pub food_access: Option<f64>,
    /// Average commute time.
    pub commute_burden: Option<f64>,
}

impl AreaRecord {
    /// Returns the raw value for `indicator`, if present.
    #[must_use]
    pub const fn value(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::EconomicBurden => self.economic_burden,
            Indicator::ParkAccess => self.park_access,
            Indicator::FoodAccess => self.food_access,
            Indicator::CommuteBurden => self.commute_burden,
        }
    }
}

/// Feature property names holding each indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorFields {
    /// Property holding [`Indicator::EconomicBurden`].
    pub economic_burden: String,
    /// Property holding [`Indicator::ParkAccess`].
    pub park_access: String,
    /// Property holding [`Indicator::FoodAccess`].
    pub food_access: String,
    /// Property holding [`Indicator::CommuteBurden`].
    pub commute_burden: String,
}

impl IndicatorFields {
    /// Returns the property name for `indicator`.
    #[must_use]
    pub fn get(&self, indicator: Indicator) -> &str {
        match indicator {
            Indicator::EconomicBurden => &self.economic_burden,
            Indicator::ParkAccess => &self.park_access,
            Indicator::FoodAccess => &self.food_access,
            Indicator::CommuteBurden => &self.commute_burden,
        }
    }
}

impl Default for IndicatorFields {
    fn default() -> Self {
        Self {
            economic_burden: "rent_income_ratio".to_string(),
            park_access: "park_area_ratio".to_string(),
            food_access: "food_density".to_string(),
            commute_burden: "avg_commute_time".to_string(),
        }
    }
}

/// Ordered class boundaries produced by the natural-breaks classifier.
///
/// Either empty (nothing to classify), a single value (one distinct
/// score), or `classes + 1` values where the first is the minimum score
/// and the last is the maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints(pub Vec<f64>);

impl Breakpoints {
    /// Whether there are enough boundaries to build a stepped scale.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        self.0.len() >= 2
    }

    /// All boundary values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of classes described, or 0 when unclassified.
    #[must_use]
    pub const fn class_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Lowest boundary (the minimum classified score).
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.0.first().copied()
    }

    /// Highest boundary (the maximum classified score).
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Boundaries that start a new class, excluding the minimum and the
    /// maximum.
    #[must_use]
    pub fn interior(&self) -> &[f64] {
        if self.0.len() < 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    /// Zero-based class of `score` under step semantics: a score at or
    /// above an interior threshold falls in that threshold's class.
    ///
    /// Returns `None` for missing or non-finite scores and when there is
    /// no classification.
    #[must_use]
    pub fn class_of(&self, score: Option<f64>) -> Option<usize> {
        let score = score.filter(|s| s.is_finite())?;
        if !self.is_classified() {
            return None;
        }
        Some(self.interior().iter().filter(|b| score >= **b).count())
    }
}

/// Configuration for one composite index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Unique identifier (e.g., `"tlbi"`).
    pub id: String,
    /// Human-readable name used as a legend title.
    pub name: String,
    /// Feature property the composite score is written to.
    pub score_property: String,
    /// Feature property used as the area id when a feature has no `id`.
    pub id_property: Option<String>,
    /// Requested number of classes.
    pub class_count: usize,
    /// Color used when the scores cannot be classified.
    pub fallback_color: String,
    /// Class colors, lowest class first.
    pub palette: Vec<String>,
    /// Property names of the four indicators.
    #[serde(default)]
    pub fields: IndicatorFields,
    /// Initial weights offered to the user.
    #[serde(default)]
    pub default_weights: Weights,
}

/// One row of a class legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Lower boundary of the class.
    pub from: f64,
    /// Upper boundary of the class.
    pub to: f64,
    /// Fill color.
    pub color: String,
}

/// Classification output handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOutput {
    /// Property the expression reads.
    pub property: String,
    /// Class boundaries.
    pub breaks: Breakpoints,
    /// Stepped fill-color expression, or a plain color string.
    pub fill_color: serde_json::Value,
    /// Legend rows, one per class.
    pub legend: Vec<LegendEntry>,
}
