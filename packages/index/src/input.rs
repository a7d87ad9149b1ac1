//! Input boundary: feature collection parsing and indicator extraction.
//!
//! Structural problems (not JSON, not `GeoJSON`, not a feature collection)
//! fail here, before any computation runs. Per-feature data problems do
//! not: an indicator that is absent, `null`, or not a number is simply
//! missing.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, feature::Id};
use tlbi_map_index_models::{AreaRecord, Indicator, IndicatorFields};

use crate::IndexError;

/// Parses `GeoJSON` text that must be a `FeatureCollection`.
///
/// # Errors
///
/// Returns an error if the text is not valid `GeoJSON` or is a single
/// feature or geometry rather than a collection.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, IndexError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(IndexError::InvalidInput {
            message: "expected a FeatureCollection, found a single Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(IndexError::InvalidInput {
            message: "expected a FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// Reads and parses a feature collection file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a feature
/// collection.
pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection, IndexError> {
    let text = std::fs::read_to_string(path)?;
    let collection = parse_feature_collection(&text)?;
    log::info!(
        "Loaded {} features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Extracts one [`AreaRecord`] per feature, in feature order.
///
/// The area id is the feature's `id`, else the `id_property` value, else
/// the feature's position in the collection.
#[must_use]
pub fn area_records(
    collection: &FeatureCollection,
    fields: &IndicatorFields,
    id_property: Option<&str>,
) -> Vec<AreaRecord> {
    let records: Vec<AreaRecord> = collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| AreaRecord {
            id: area_id(feature, id_property).unwrap_or_else(|| i.to_string()),
            economic_burden: indicator_value(feature, fields.get(Indicator::EconomicBurden)),
            park_access: indicator_value(feature, fields.get(Indicator::ParkAccess)),
            food_access: indicator_value(feature, fields.get(Indicator::FoodAccess)),
            commute_burden: indicator_value(feature, fields.get(Indicator::CommuteBurden)),
        })
        .collect();

    if !records.is_empty() && records.iter().all(|r| r.economic_burden.is_none()) {
        log::warn!(
            "No feature carries a numeric '{}'; every area will be unscored",
            fields.economic_burden
        );
    }

    records
}

/// Reads a numeric property. Anything other than a JSON number is missing.
fn indicator_value(feature: &Feature, property: &str) -> Option<f64> {
    feature
        .property(property)
        .and_then(serde_json::Value::as_f64)
}

fn area_id(feature: &Feature, id_property: Option<&str>) -> Option<String> {
    match &feature.id {
        Some(Id::String(id)) => return Some(id.clone()),
        Some(Id::Number(id)) => return Some(id.to_string()),
        None => {}
    }

    match feature.property(id_property?)? {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
