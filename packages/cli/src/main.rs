#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the housing affordability analysis tool.
//!
//! Loads a housing records CSV, runs one analysis around a target zip,
//! and prints the result as JSON for downstream rendering. Logging goes
//! to stderr via `pretty_env_logger` (`RUST_LOG=debug` for pipeline
//! detail), keeping stdout clean for the JSON payload.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use housing_map_analysis::run_analysis;
use housing_map_geo::{BufferZone, is_valid_coordinate};
use housing_map_housing_models::{AnalysisConfig, GeoPoint, LocationRecord};
use housing_map_mortgage::affordability_thresholds;

#[derive(Parser)]
#[command(name = "housing_map", about = "Housing affordability analysis tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the affordability analysis around a target record
    Analyze {
        /// Path to the housing records CSV
        #[arg(long)]
        records: PathBuf,
        /// Zip/id of the target record
        #[arg(long)]
        target: String,
        /// Buffer radius in miles
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
        /// H3 grid resolution (1..=15, larger means smaller cells)
        #[arg(long, default_value_t = 6)]
        resolution: u8,
        /// Adjacency rings to expand around the seed cell
        #[arg(long, default_value_t = 3)]
        rings: u32,
        /// Down payment in dollars
        #[arg(long, default_value_t = 0.0)]
        down_payment: f64,
        /// Mortgage term in years (15/20/30)
        #[arg(long, default_value_t = 30)]
        term: u32,
        /// Monthly gross income in dollars
        #[arg(long)]
        income: f64,
        /// Recurring monthly expenses in dollars
        #[arg(long, default_value_t = 0.0)]
        expenses: f64,
    },
    /// Print the buffer polygon around a target record as GeoJSON
    Buffer {
        /// Path to the housing records CSV
        #[arg(long)]
        records: PathBuf,
        /// Zip/id of the target record
        #[arg(long)]
        target: String,
        /// Buffer radius in miles
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
    },
    /// Report how many loaded rows are geocoded and priced
    Validate {
        /// Path to the housing records CSV
        #[arg(long)]
        records: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    match Cli::parse().command {
        Commands::Analyze {
            records,
            target,
            radius,
            resolution,
            rings,
            down_payment,
            term,
            income,
            expenses,
        } => {
            let rows = housing_map_source::load_records(&records)?;
            let target_record = find_target(&rows, &target)?.clone();

            let config = AnalysisConfig {
                radius_miles: radius,
                resolution,
                ring_count: rings,
                down_payment,
                term_years: term,
                thresholds: affordability_thresholds(income, expenses),
            };

            let result = run_analysis(&rows, &target_record, &config)?;
            log::info!(
                "Analysis complete: {} non-empty hexagons around {target}",
                result.hexagons.len()
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Buffer {
            records,
            target,
            radius,
        } => {
            let rows = housing_map_source::load_records(&records)?;
            let target_record = find_target(&rows, &target)?;
            let center = GeoPoint {
                lat: target_record.latitude,
                lng: target_record.longitude,
            };
            let buffer = BufferZone::build(center, radius)?;
            println!("{}", serde_json::to_string_pretty(&buffer.to_geojson())?);
        }
        Commands::Validate { records } => validate(&records)?,
    }

    Ok(())
}

fn find_target<'a>(
    rows: &'a [LocationRecord],
    id: &str,
) -> Result<&'a LocationRecord, Box<dyn std::error::Error>> {
    rows.iter()
        .find(|r| r.id == id)
        .ok_or_else(|| format!("Target record {id} not found in the loaded feed").into())
}

fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = housing_map_source::load_records(path)?;
    let geocoded = rows
        .iter()
        .filter(|r| is_valid_coordinate(r.latitude, r.longitude))
        .count();
    let priced = rows
        .iter()
        .filter(|r| r.median_home_price.is_some_and(|p| p.is_finite() && p > 0.0))
        .count();

    println!("{} records loaded", rows.len());
    println!("{geocoded} with valid coordinates");
    println!("{priced} with a usable median price");
    Ok(())
}
