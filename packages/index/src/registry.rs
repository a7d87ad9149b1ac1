//! Index definitions: the embedded default plus TOML loading.
//!
//! The default definition lives in `packages/index/definitions/tlbi.toml`
//! and is baked into the binary at compile time via [`include_str!`].
//! Hosts can point at their own TOML file with the same schema to rename
//! properties, change the class count, or swap the palette.

use std::collections::BTreeSet;
use std::path::Path;

use tlbi_map_index_models::{Indicator, IndexDefinition};

use crate::IndexError;

/// Default definition embedded at compile time.
const DEFAULT_DEFINITION_TOML: &str = include_str!("../definitions/tlbi.toml");

/// Returns the built-in living burden index definition.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse or validate. Since it is a
/// compile-time constant, a failure indicates a development error and is
/// caught by the tests below.
#[must_use]
pub fn default_definition() -> IndexDefinition {
    parse_definition_toml(DEFAULT_DEFINITION_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse default index definition: {e}"))
}

/// Parses and validates a definition from TOML text.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or the definition fails
/// [`validate_definition`].
pub fn parse_definition_toml(toml_str: &str) -> Result<IndexDefinition, IndexError> {
    let definition: IndexDefinition = toml::de::from_str(toml_str)?;
    validate_definition(&definition)?;
    Ok(definition)
}

/// Reads, parses and validates a definition file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are not a
/// valid definition.
pub fn load_definition(path: &Path) -> Result<IndexDefinition, IndexError> {
    let contents = std::fs::read_to_string(path)?;
    let definition = parse_definition_toml(&contents)?;
    log::info!(
        "Loaded index definition '{}' from {}",
        definition.id,
        path.display()
    );
    Ok(definition)
}

/// Serializes a definition back to TOML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn definition_to_toml(definition: &IndexDefinition) -> Result<String, IndexError> {
    Ok(toml::to_string(definition)?)
}

/// Checks that a definition can drive the engine and the renderer.
///
/// # Errors
///
/// Returns [`IndexError::Definition`] describing the first problem found.
pub fn validate_definition(definition: &IndexDefinition) -> Result<(), IndexError> {
    let fail = |message: String| Err(IndexError::Definition { message });

    if definition.id.trim().is_empty() {
        return fail("id is empty".to_string());
    }
    if definition.score_property.trim().is_empty() {
        return fail("score_property is empty".to_string());
    }
    if definition.class_count < 2 {
        return fail(format!(
            "class_count must be at least 2, got {}",
            definition.class_count
        ));
    }
    if definition.palette.len() < definition.class_count {
        return fail(format!(
            "palette has {} colors but class_count is {}",
            definition.palette.len(),
            definition.class_count
        ));
    }

    let mut seen = BTreeSet::new();
    for indicator in Indicator::ALL {
        let field = definition.fields.get(indicator);
        if field.trim().is_empty() {
            return fail(format!("field for {indicator} is empty"));
        }
        if field == definition.score_property {
            return fail(format!(
                "field for {indicator} collides with score_property '{field}'"
            ));
        }
        if !seen.insert(field) {
            return fail(format!("field '{field}' is used by more than one indicator"));
        }

        let weight = definition.default_weights.get(indicator);
        if !weight.is_finite() || weight < 0.0 {
            return fail(format!("default weight for {indicator} is {weight}"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlbi_map_index_models::{IndicatorFields, Weights};

    #[test]
    fn default_definition_parses() {
        let definition = default_definition();
        assert_eq!(definition.id, "tlbi");
        assert_eq!(definition.score_property, "TLBI");
        assert_eq!(definition.id_property.as_deref(), Some("Location_x"));
        assert_eq!(definition.class_count, 6);
        assert_eq!(definition.palette.len(), 6);
        assert_eq!(definition.fallback_color, "#ccc");
        assert_eq!(definition.fields, IndicatorFields::default());
        assert_eq!(definition.default_weights, Weights::default());
    }

    #[test]
    fn definition_round_trips_through_toml() {
        let definition = default_definition();
        let text = definition_to_toml(&definition).unwrap();
        assert_eq!(parse_definition_toml(&text).unwrap(), definition);
    }

    #[test]
    fn fields_and_weights_default_when_omitted() {
        let definition = parse_definition_toml(
            r##"
id = "minimal"
name = "Minimal"
score_property = "score"
class_count = 2
fallback_color = "#000"
palette = ["#111", "#222"]
"##,
        )
        .unwrap();
        assert_eq!(definition.id_property, None);
        assert_eq!(definition.fields, IndicatorFields::default());
        assert_eq!(definition.default_weights, Weights::default());
    }

    #[test]
    fn rejects_short_palette() {
        let mut definition = default_definition();
        definition.palette.truncate(4);
        let err = validate_definition(&definition).unwrap_err();
        assert!(err.to_string().contains("palette has 4 colors"), "{err}");
    }

    #[test]
    fn rejects_single_class() {
        let mut definition = default_definition();
        definition.class_count = 1;
        assert!(matches!(
            validate_definition(&definition),
            Err(IndexError::Definition { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_fields() {
        let mut definition = default_definition();
        definition.fields.food_access = definition.fields.park_access.clone();
        let err = validate_definition(&definition).unwrap_err();
        assert!(err.to_string().contains("more than one indicator"), "{err}");
    }

    #[test]
    fn rejects_score_property_colliding_with_field() {
        let mut definition = default_definition();
        definition.score_property = "rent_income_ratio".to_string();
        assert!(validate_definition(&definition).is_err());
    }

    #[test]
    fn rejects_negative_default_weight() {
        let mut definition = default_definition();
        definition.default_weights.commute_burden = -0.1;
        assert!(validate_definition(&definition).is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            parse_definition_toml("id = "),
            Err(IndexError::Toml(_))
        ));
    }
}
