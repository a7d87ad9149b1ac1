#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composite living burden index engine.
//!
//! Turns a raw `GeoJSON` feature collection and four user weights into a
//! scored copy of the collection plus natural-breaks class boundaries.
//! Every pass is a pure function of its inputs: weights are normalized,
//! each indicator is quantile-ranked across all areas, the ranks are
//! blended into one score per area, and the scores are classified for a
//! stepped choropleth scale.
//!
//! Only the boundary functions in [`input`] and [`registry`] can fail.
//! The computation itself degrades missing data to `null` scores or zero
//! contributions instead of returning errors.

pub mod composite;
pub mod input;
pub mod jenks;
pub mod pipeline;
pub mod quantile;
pub mod registry;
pub mod style;
pub mod weights;

pub use pipeline::{Recomputation, recompute};
pub use tlbi_map_index_models as models;

use thiserror::Error;

/// Errors raised while loading inputs or index definitions.
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Input is well-formed JSON but not a usable feature collection.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what went wrong.
        message: String,
    },

    /// Index definition failed validation.
    #[error("Invalid index definition: {message}")]
    Definition {
        /// Description of what went wrong.
        message: String,
    },
}
