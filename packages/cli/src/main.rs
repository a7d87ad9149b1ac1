#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the living burden index tool.
//!
//! Without a subcommand, starts the interactive reweighting loop.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tlbi_map_cli::{OutputPaths, parse_weights, resolve_definition, summary, write_outputs};
use tlbi_map_index::input::load_feature_collection;
use tlbi_map_index::recompute;
use tlbi_map_index::registry::definition_to_toml;
use tlbi_map_index_models::Weights;

#[derive(Parser)]
#[command(name = "tlbi_map_cli", about = "Living burden index scoring tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a feature collection once and write the results
    Compute {
        /// `GeoJSON` feature collection with the raw indicators
        #[arg(long)]
        input: PathBuf,
        /// Where to write the scored feature collection
        #[arg(long)]
        output: Option<PathBuf>,
        /// Where to write breakpoints, fill-color expression and legend
        #[arg(long)]
        style_output: Option<PathBuf>,
        /// Weights as "economic,park,food,commute", each 0-1
        /// (defaults to the definition's default weights)
        #[arg(long, value_parser = parse_weights)]
        weights: Option<Weights>,
        /// Index definition TOML (overrides `TLBI_MAP_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Adjust weights interactively and watch the classes change
    Interactive {
        /// `GeoJSON` feature collection with the raw indicators
        #[arg(long)]
        input: Option<PathBuf>,
        /// Index definition TOML (overrides `TLBI_MAP_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective index definition as TOML
    Definition {
        /// Index definition TOML (overrides `TLBI_MAP_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return tlbi_map_cli::interactive::run(None, None);
    };

    match command {
        Commands::Compute {
            input,
            output,
            style_output,
            weights,
            config,
        } => {
            let definition = resolve_definition(config.as_deref())?;
            let raw = load_feature_collection(&input)?;
            let weights = weights.unwrap_or(definition.default_weights);

            let result = recompute(&raw, &weights, &definition);
            println!("{}", summary(&definition, &result));

            write_outputs(
                &result,
                &OutputPaths {
                    features: output,
                    style: style_output,
                },
            )?;
        }
        Commands::Interactive { input, config } => {
            tlbi_map_cli::interactive::run(input.as_deref(), config.as_deref())?;
        }
        Commands::Definition { config } => {
            let definition = resolve_definition(config.as_deref())?;
            print!("{}", definition_to_toml(&definition)?);
        }
    }

    Ok(())
}
