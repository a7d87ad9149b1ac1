//! Interactive reweighting loop.
//!
//! Provides a terminal-based UI using `dialoguer` that stands in for the
//! map's weight controls: adjust one indicator weight at a time and the
//! whole index is recomputed from the raw data, with the new class
//! boundaries and legend printed after every change.

use std::path::{Path, PathBuf};

use dialoguer::{Input, Select};
use tlbi_map_index::input::load_feature_collection;
use tlbi_map_index::recompute;
use tlbi_map_index_models::{Indicator, Weights};

use crate::{OutputPaths, resolve_definition, summary, write_outputs};

/// Menu entries offered after every recomputation.
#[derive(Clone, Copy)]
enum Action {
    Adjust(Indicator),
    Reset,
    Save,
    Quit,
}

impl Action {
    fn all() -> Vec<Self> {
        Indicator::ALL
            .into_iter()
            .map(Self::Adjust)
            .chain([Self::Reset, Self::Save, Self::Quit])
            .collect()
    }

    fn label(self, weights: &Weights) -> String {
        match self {
            Self::Adjust(indicator) => format!(
                "Adjust {} (currently {:.2})",
                indicator.label(),
                weights.get(indicator)
            ),
            Self::Reset => "Reset weights to defaults".to_string(),
            Self::Save => "Save outputs".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// Runs the interactive session.
///
/// Prompts for the input file when `input` is `None`.
///
/// # Errors
///
/// Returns an error if the input or definition cannot be loaded, user
/// input fails, or writing outputs fails.
pub fn run(input: Option<&Path>, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let input = match input {
        Some(path) => path.to_path_buf(),
        None => {
            let path: String = Input::new()
                .with_prompt("Path to the GeoJSON feature collection")
                .interact_text()?;
            PathBuf::from(path.trim())
        }
    };

    let definition = resolve_definition(config)?;
    let raw = load_feature_collection(&input)?;
    let mut weights = definition.default_weights;

    loop {
        let result = recompute(&raw, &weights, &definition);
        println!();
        println!("{}", summary(&definition, &result));
        println!();

        let actions = Action::all();
        let labels: Vec<String> = actions.iter().map(|a| a.label(&weights)).collect();

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[selection] {
            Action::Adjust(indicator) => {
                let value: f64 = Input::new()
                    .with_prompt(format!("{} weight (0-1)", indicator.label()))
                    .default(weights.get(indicator))
                    .validate_with(|value: &f64| -> Result<(), &'static str> {
                        if (0.0..=1.0).contains(value) {
                            Ok(())
                        } else {
                            Err("weight must be between 0 and 1")
                        }
                    })
                    .interact_text()?;
                weights.set(indicator, value);
            }
            Action::Reset => weights = definition.default_weights,
            Action::Save => {
                let features: String = Input::new()
                    .with_prompt("Scored GeoJSON path")
                    .default("scored.geojson".to_string())
                    .interact_text()?;
                let style: String = Input::new()
                    .with_prompt("Style JSON path")
                    .default("style.json".to_string())
                    .interact_text()?;
                let paths = OutputPaths {
                    features: Some(PathBuf::from(features.trim())),
                    style: Some(PathBuf::from(style.trim())),
                };
                write_outputs(&result, &paths)?;
            }
            Action::Quit => break,
        }
    }

    Ok(())
}
