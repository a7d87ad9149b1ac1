#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line host for the living burden index.
//!
//! Owns everything the engine deliberately does not: reading the source
//! `GeoJSON`, holding the current weights, writing the scored collection
//! and style output, and the interactive reweighting loop.

pub mod interactive;

use std::path::{Path, PathBuf};

use tlbi_map_index::registry::{default_definition, load_definition};
use tlbi_map_index::{IndexError, Recomputation};
use tlbi_map_index_models::{Indicator, IndexDefinition, Weights};

/// Environment variable naming an index definition TOML file.
pub const CONFIG_ENV: &str = "TLBI_MAP_CONFIG";

/// Resolves the index definition to use.
///
/// Precedence: explicit `path`, then [`CONFIG_ENV`], then the embedded
/// default.
///
/// # Errors
///
/// Returns an error if a configured file cannot be loaded or is invalid.
pub fn resolve_definition(path: Option<&Path>) -> Result<IndexDefinition, IndexError> {
    if let Some(path) = path {
        return load_definition(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) if !env_path.trim().is_empty() => load_definition(Path::new(env_path.trim())),
        _ => {
            log::debug!("Using embedded index definition");
            Ok(default_definition())
        }
    }
}

/// Parses `E,A,I,C` weights (e.g. `"0.4,0.2,0.2,0.2"`).
///
/// Each weight must be a number between 0 and 1, matching the range of
/// the interactive weight controls.
///
/// # Errors
///
/// Returns a message if there are not exactly four values or any value
/// is out of range.
pub fn parse_weights(text: &str) -> Result<Weights, String> {
    let values = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|e| format!("Invalid weight '{part}': {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [economic_burden, park_access, food_access, commute_burden] = values[..] else {
        return Err(format!(
            "Expected 4 comma-separated weights (economic, park, food, commute), got {}",
            values.len()
        ));
    };

    let weights = Weights::new(economic_burden, park_access, food_access, commute_burden);
    for indicator in Indicator::ALL {
        let value = weights.get(indicator);
        if !(0.0..=1.0).contains(&value) {
            return Err(format!(
                "Weight for {indicator} must be between 0 and 1, got {value}"
            ));
        }
    }

    Ok(weights)
}

/// Writes `contents` to `path` via a `.tmp` sibling and a rename, so an
/// interrupted write never leaves a truncated file behind.
///
/// # Errors
///
/// Returns an error if the file cannot be written or renamed. A failed
/// rename removes the temporary file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), IndexError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Where to write the results of a pass.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    /// Scored `GeoJSON` feature collection.
    pub features: Option<PathBuf>,
    /// Breakpoints, fill-color expression and legend as JSON.
    pub style: Option<PathBuf>,
}

/// Writes whichever outputs have a path configured.
///
/// # Errors
///
/// Returns an error if serialization or any write fails.
pub fn write_outputs(result: &Recomputation, paths: &OutputPaths) -> Result<(), IndexError> {
    if let Some(path) = &paths.features {
        write_atomic(path, &serde_json::to_string(&result.features)?)?;
        log::info!("Scored features written: {}", path.display());
    }
    if let Some(path) = &paths.style {
        write_atomic(path, &serde_json::to_string_pretty(&result.style_output())?)?;
        log::info!("Style output written: {}", path.display());
    }
    Ok(())
}

/// Renders a short human-readable report of a pass.
#[must_use]
pub fn summary(definition: &IndexDefinition, result: &Recomputation) -> String {
    let mut lines = vec![
        definition.name.clone(),
        format!(
            "  weights: economic {:.3}, park {:.3}, food {:.3}, commute {:.3}",
            result.weights.economic_burden,
            result.weights.park_access,
            result.weights.food_access,
            result.weights.commute_burden
        ),
        format!(
            "  areas: {} ({} scored, {} unscored)",
            result.scores.len(),
            result.scored_count(),
            result.scores.len() - result.scored_count()
        ),
    ];

    if result.breaks.is_classified() {
        for (entry, count) in result.legend.iter().zip(result.class_counts()) {
            lines.push(format!(
                "  {:>7.4} - {:<7.4} {} {count} areas",
                entry.from, entry.to, entry.color
            ));
        }
    } else {
        lines.push("  unclassified (not enough distinct scores)".to_string());
    }

    lines.join("\n")
}
